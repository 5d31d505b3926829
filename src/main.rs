// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use clap::{App, Arg, ArgMatches};
use separator::Separatable;

use sokoban_astar::config::{HeuristicKind, Mode, SolverConfig};
use sokoban_astar::moves::Moves;
use sokoban_astar::play::{self, Command, Play};
use sokoban_astar::solution_formatter::SolutionFormatter;
use sokoban_astar::solver::SearchOutcome;
use sokoban_astar::{LoadPuzzle, Puzzle, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-astar")
        .author(crate_authors!())
        .version(crate_version!())
        .about("Solves Sokoban puzzles with A*")
        .arg(
            Arg::with_name("heuristics")
                .short("H")
                .long("heuristics")
                .takes_value(true)
                .value_name("DIGITS")
                .default_value("0")
                .validator(validate_heuristics)
                .help(
                    "Heuristics to solve with, in sequence, e.g. 023:\n\
                     0 - null\n\
                     1 - Manhattan distance (not admissible)\n\
                     2 - navigation distance\n\
                     3 - cached navigation distance\n\
                     4 - other",
                ),
        )
        .arg(
            Arg::with_name("max-iters")
                .short("m")
                .long("max-iters")
                .takes_value(true)
                .value_name("N")
                .default_value("100000")
                .validator(validate_number)
                .help("Maximum number of search iterations"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .takes_value(true)
                .value_name("N")
                .default_value("0")
                .validator(validate_number)
                .help("Print search progress every N iterations (0 = never)"),
        )
        .arg(
            Arg::with_name("pull")
                .long("pull")
                .help("Allow pulling boxes"),
        )
        .arg(
            Arg::with_name("first-goal")
                .long("first-goal")
                .help("Stop as soon as a goal is generated (faster, might not be optimal)"),
        )
        .arg(
            Arg::with_name("play")
                .long("play")
                .help("Play the puzzle instead of solving it"),
        )
        .arg(
            Arg::with_name("path")
                .short("p")
                .long("path")
                .takes_value(true)
                .value_name("FILE")
                .help("Replay a path file in play mode (implies --play)"),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .value_name("FILE")
                .help("Where to save the solution (default: the map path with extension .path)"),
        )
        .arg(Arg::with_name("map").required(true).value_name("MAP"))
        .get_matches();

    let map_path = matches.value_of("map").unwrap();
    let puzzle = map_path.load_puzzle().unwrap_or_else(|err| {
        println!("Can't load map {}: {}", map_path, err);
        process::exit(1);
    });

    let mode = if matches.is_present("pull") {
        Mode::Pull
    } else {
        Mode::Push
    };

    if matches.is_present("play") || matches.is_present("path") {
        run_play(&puzzle, mode, matches.value_of("path"));
    } else {
        run_search(&puzzle, map_path, mode, &matches);
    }
}

fn validate_heuristics(digits: String) -> Result<(), String> {
    match digits.chars().find(|&c| HeuristicKind::from_digit(c).is_none()) {
        Some(c) => Err(format!(
            "Invalid heuristic specification {}, must be between 0 and 4",
            c
        )),
        None if digits.is_empty() => Err("No heuristics".to_owned()),
        None => Ok(()),
    }
}

fn validate_number(number: String) -> Result<(), String> {
    number
        .parse::<usize>()
        .map(|_| ())
        .map_err(|err| format!("{}: {}", number, err))
}

fn run_search(puzzle: &Puzzle, map_path: &str, mode: Mode, matches: &ArgMatches<'_>) {
    let heuristics: Vec<_> = matches
        .value_of("heuristics")
        .unwrap()
        .chars()
        .filter_map(HeuristicKind::from_digit)
        .collect();
    let config = SolverConfig {
        mode,
        max_iters: value_t_or_exit!(matches, "max-iters", usize),
        print_iters: value_t_or_exit!(matches, "debug", usize),
        goal_on_generation: matches.is_present("first-goal"),
    };
    debug!("{:?}", config);

    // the last run that found a solution decides what gets saved
    let mut last_solution = None;
    for heuristic in heuristics {
        println!("Beginning planning with heuristic: {}", heuristic);
        if !heuristic.is_admissible() {
            info!("{} is not admissible, the solution might not be optimal", heuristic);
        }

        let solver_ok = puzzle.solve(heuristic, &config).unwrap_or_else(|err| {
            println!("{}", err);
            process::exit(1);
        });

        match solver_ok.outcome {
            SearchOutcome::Solved => println!(
                "A* completed with {} nodes, depth {}",
                solver_ok.num_nodes.separated_string(),
                solver_ok.depth().unwrap_or(0)
            ),
            SearchOutcome::Exhausted => println!(
                "A* explored all {} nodes, there is no solution",
                solver_ok.num_nodes.separated_string()
            ),
            SearchOutcome::LimitReached => {
                println!(
                    "A* failed after {} iterations were reached.",
                    config.max_iters.separated_string()
                );
                println!("Tree has {} nodes", solver_ok.num_nodes.separated_string());
            }
        }
        println!("{}", solver_ok.stats);

        if let (Some(states), Some(moves)) = (solver_ok.path_states, solver_ok.moves) {
            last_solution = Some((states, moves));
        }
    }

    if let Some((states, moves)) = last_solution {
        println!("Found solution:");
        print!("{}", SolutionFormatter::new(&puzzle.map, &states));
        println!("{}", moves);
        println!("Moves: {}", moves.move_cnt());

        let out_path = matches
            .value_of("out")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(map_path).with_extension("path"));
        save_path(&out_path, &moves);
    }
}

fn save_path(out_path: &Path, moves: &Moves) {
    println!("Saving result to {}", out_path.display());
    if let Err(err) = fs::write(out_path, moves.to_path_file()) {
        println!("Can't write {}: {}", out_path.display(), err);
        process::exit(1);
    }
}

fn run_play(puzzle: &Puzzle, mode: Mode, path_file: Option<&str>) {
    let mut play = Play::new(puzzle, mode);

    if let Some(path_file) = path_file {
        let commands = fs::read_to_string(path_file).unwrap_or_else(|err| {
            println!("Can't read path file {}: {}", path_file, err);
            process::exit(1);
        });
        let failed = play.replay(&commands);
        if failed > 0 {
            println!("{} commands in {} could not be performed", failed, path_file);
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("Step {}", play.step());
        if play.is_finished() {
            println!("FINISHED!");
        }
        print!("{}", play.format());
        println!("{}", play::HELP);

        let cmds = match read_commands(&mut lines) {
            Some(cmds) => cmds,
            // end of input
            None => return,
        };
        if cmds.contains(&Command::Quit) {
            println!("Quitting");
            return;
        }
        for cmd in cmds {
            if let Err(err) = play.perform(cmd) {
                println!("{}", err);
            }
        }
    }
}

/// Reads lines until one consists only of valid commands.
fn read_commands<I>(lines: &mut I) -> Option<Vec<Command>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let line = match lines.next()? {
            Ok(line) => line,
            Err(err) => {
                println!("Can't read input: {}", err);
                return None;
            }
        };

        let mut cmds = Vec::new();
        let mut valid = true;
        for c in line.trim().chars() {
            match Command::from_char(c) {
                Some(cmd) => cmds.push(cmd),
                None => {
                    println!("Invalid command {}", c);
                    valid = false;
                }
            }
        }
        if valid && !cmds.is_empty() {
            return Some(cmds);
        }
    }
}
