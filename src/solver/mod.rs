pub mod a_star;
#[cfg(feature = "graph")]
pub mod graph;
pub mod heuristic;
pub mod navigation;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

use crate::config::{HeuristicKind, Mode, SolverConfig};
use crate::moves::Moves;
use crate::puzzle::Puzzle;
use crate::rules::PuzzleRules;
use crate::state::State;
use crate::Solve;

use self::a_star::{AStar, SearchDomain, Stats, Step};
use self::heuristic::Heuristic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    InvalidStart,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::InvalidStart => write!(
                f,
                "Invalid initial state - check the number of boxes and goals and that nothing overlaps"
            ),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved,
    /// Every reachable state was expanded - there's no solution.
    Exhausted,
    /// Gave up after `max_iters` steps.
    LimitReached,
}

#[derive(Clone)]
pub struct SolverOk {
    pub heuristic: HeuristicKind,
    pub outcome: SearchOutcome,
    /// States from start to goal (both inclusive)
    pub path_states: Option<Vec<State>>,
    pub moves: Option<Moves>,
    /// Search steps taken
    pub iterations: usize,
    /// Size of the search tree at the end
    pub num_nodes: usize,
    pub stats: Stats,
}

impl SolverOk {
    /// Number of states on the path including start and goal.
    pub fn depth(&self) -> Option<usize> {
        self.path_states.as_ref().map(Vec::len)
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}: {} moves", self.heuristic, moves.move_cnt())?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Puzzle {
    fn solve(&self, heuristic: HeuristicKind, config: &SolverConfig) -> Result<SolverOk, SolverErr> {
        solve(self, heuristic, config)
    }
}

/// Sokoban as a search problem - every move costs 1.
#[derive(Debug)]
pub struct SokobanSearch<'a> {
    rules: PuzzleRules<'a>,
    mode: Mode,
    heuristic: Box<dyn Heuristic + 'a>,
}

impl<'a> SokobanSearch<'a> {
    pub fn new(rules: PuzzleRules<'a>, mode: Mode, heuristic: Box<dyn Heuristic + 'a>) -> Self {
        Self {
            rules,
            mode,
            heuristic,
        }
    }
}

impl SearchDomain for SokobanSearch<'_> {
    type State = State;

    fn is_goal(&self, state: &State) -> bool {
        self.rules.is_goal(state)
    }

    fn expand(&self, state: &State) -> Vec<(State, u32)> {
        self.rules
            .successors(state, self.mode)
            .into_iter()
            .map(|succ| (succ, 1))
            .collect()
    }

    fn evaluate(&mut self, state: &State) -> u32 {
        self.heuristic.evaluate(state)
    }
}

pub fn solve(
    puzzle: &Puzzle,
    heuristic: HeuristicKind,
    config: &SolverConfig,
) -> Result<SolverOk, SolverErr> {
    let h = heuristic::create(heuristic, &puzzle.map, config.mode);
    solve_with(puzzle, heuristic, h, config)
}

/// Like `solve` but with any heuristic, `kind` is only used for reporting.
pub fn solve_with<'a>(
    puzzle: &'a Puzzle,
    kind: HeuristicKind,
    heuristic: Box<dyn Heuristic + 'a>,
    config: &SolverConfig,
) -> Result<SolverOk, SolverErr> {
    let rules = PuzzleRules::new(&puzzle.map);
    if !rules.is_valid(&puzzle.state) {
        return Err(SolverErr::InvalidStart);
    }

    debug!(
        "Search called: {} ({} mode), max {} iterations",
        kind, config.mode, config.max_iters
    );
    let domain = SokobanSearch::new(rules, config.mode, heuristic);
    let mut a_star = AStar::new(domain, config.goal_on_generation);
    a_star.reset(puzzle.state.clone());

    let mut iterations = 0;
    let outcome = loop {
        if iterations >= config.max_iters {
            break SearchOutcome::LimitReached;
        }
        iterations += 1;
        match a_star.step() {
            Step::Solved => break SearchOutcome::Solved,
            Step::Exhausted => break SearchOutcome::Exhausted,
            Step::Searching => {}
        }

        if config.print_iters > 0 && iterations % config.print_iters == 0 {
            println!("Iteration {}:", iterations.separated_string());
            println!("Tree has size {}", a_star.num_nodes().separated_string());
            println!("Open set has size {}", a_star.open_len().separated_string());
        }
    };
    debug!("Search finished: {:?} after {} iterations", outcome, iterations);

    let num_nodes = a_star.num_nodes();
    let stats = a_star.stats().clone();
    let path_states = a_star.into_path();
    let moves = path_states.as_ref().map(|states| {
        // consecutive states come from single moves so this can't fail
        Moves::from_states(states).unwrap_or_else(|err| panic!("Broken solution path: {}", err))
    });

    Ok(SolverOk {
        heuristic: kind,
        outcome,
        path_states,
        moves,
        iterations,
        num_nodes,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;
    use crate::LoadPuzzle;

    const ROOM: &str = r"
6 5
######
#p   #
# o  #
#  . #
######
";

    const TWO_BOXES: &str = r"
7 6
#######
#p    #
# o o #
#  .  #
# .   #
#######
";

    const CORNER: &str = r"
6 4
######
#o  .#
#  p #
######
";

    fn config(mode: Mode) -> SolverConfig {
        SolverConfig {
            mode,
            ..SolverConfig::default()
        }
    }

    fn solve_str(level: &str, heuristic: HeuristicKind, config: &SolverConfig) -> SolverOk {
        let puzzle: Puzzle = level.parse().unwrap();
        puzzle.solve(heuristic, config).unwrap()
    }

    fn moves_str(ok: &SolverOk) -> String {
        ok.moves.as_ref().unwrap().to_string()
    }

    #[test]
    fn room_with_null_heuristic() {
        let ok = solve_str(ROOM, HeuristicKind::Null, &config(Mode::Push));
        assert_eq!(ok.outcome, SearchOutcome::Solved);
        assert_eq!(moves_str(&ok), "rdldr");
        assert_eq!(ok.depth(), Some(6));
        assert_eq!(ok.iterations, 38);
        assert_eq!(ok.num_nodes, 58);
        assert_eq!(ok.stats.total_created(), 58);
        assert_eq!(ok.stats.total_expanded(), 37);
        assert_eq!(ok.stats.total_duplicates(), 51);

        let path = ok.path_states.as_ref().unwrap();
        let puzzle: Puzzle = ROOM.parse().unwrap();
        assert_eq!(path[0], puzzle.state);
        assert_eq!(path[5].boxes(), &[Pos::new(3, 3)]);
    }

    #[test]
    fn heuristics_speed_up_search() {
        let null = solve_str(ROOM, HeuristicKind::Null, &config(Mode::Push));
        let nav = solve_str(ROOM, HeuristicKind::Navigation, &config(Mode::Push));
        let cached = solve_str(ROOM, HeuristicKind::CachedNavigation, &config(Mode::Push));
        assert_eq!(moves_str(&nav), moves_str(&null));
        assert_eq!(nav.num_nodes, 17);
        assert_eq!(nav.stats.total_expanded(), 7);
        assert_eq!(cached.num_nodes, nav.num_nodes);
        assert_eq!(cached.stats, nav.stats);
    }

    #[test]
    fn admissible_heuristics_agree() {
        let lens: Vec<_> = HeuristicKind::ALL
            .iter()
            .map(|&h| {
                let ok = solve_str(TWO_BOXES, h, &config(Mode::Push));
                ok.moves.unwrap().move_cnt()
            })
            .collect();
        assert_eq!(lens, vec![11; 5]);

        let null = solve_str(TWO_BOXES, HeuristicKind::Null, &config(Mode::Push));
        assert_eq!(moves_str(&null), "rddrrrululd");
        assert_eq!(null.stats.total_created(), 1774);
        let manhattan = solve_str(TWO_BOXES, HeuristicKind::Manhattan, &config(Mode::Push));
        assert_eq!(manhattan.stats.total_reopened(), 1);
    }

    #[test]
    fn optimal_search_never_goes_deeper_than_solution() {
        for &h in &[
            HeuristicKind::Null,
            HeuristicKind::Navigation,
            HeuristicKind::CachedNavigation,
        ] {
            let ok = solve_str(TWO_BOXES, h, &config(Mode::Push));
            let solution_len = ok.moves.as_ref().unwrap().move_cnt();
            assert!(ok.stats.max_expanded_depth().unwrap() <= solution_len);
        }
    }

    #[test]
    fn pulling_finds_shorter_solutions() {
        let ok = solve_str(TWO_BOXES, HeuristicKind::Navigation, &config(Mode::Pull));
        assert_eq!(moves_str(&ok), "rdrldrd");

        let pull_only = r"
6 3
######
#op. #
######
";
        let ok = solve_str(pull_only, HeuristicKind::Null, &config(Mode::Pull));
        assert_eq!(moves_str(&ok), "rr");
        let ok = solve_str(pull_only, HeuristicKind::Null, &config(Mode::Push));
        assert_eq!(ok.outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn small_room() {
        let level = r"
5 5
#####
#p  #
# o #
#  .#
#####
";
        let ok = solve_str(level, HeuristicKind::Null, &config(Mode::Push));
        assert_eq!(moves_str(&ok), "rdldr");
        assert_eq!(ok.iterations, 30);
        assert_eq!(ok.stats.total_created(), 40);
    }

    #[test]
    fn reopened_states_keep_cheapest_path() {
        let puzzle = "maps/warehouse.map".load_puzzle().unwrap();
        let null = puzzle.solve(HeuristicKind::Null, &config(Mode::Pull)).unwrap();
        assert_eq!(null.stats.total_reopened(), 0);
        assert_eq!(moves_str(&null), "ruuddrurrrurdluddlll");

        for &h in &[HeuristicKind::Navigation, HeuristicKind::CachedNavigation] {
            let ok = puzzle.solve(h, &config(Mode::Pull)).unwrap();
            assert_eq!(ok.stats.total_reopened(), 76);
            assert_eq!(ok.stats.total_created(), 2926);
            assert_eq!(moves_str(&ok), moves_str(&null));
        }

        let ok = puzzle.solve(HeuristicKind::Navigation, &config(Mode::Push)).unwrap();
        assert_eq!(ok.stats.total_reopened(), 102);
        assert_eq!(ok.moves.as_ref().unwrap().move_cnt(), 29);
    }

    #[test]
    fn already_solved() {
        let level = r"
5 3
#####
#p@ #
#####
";
        for &goal_on_generation in &[false, true] {
            let config = SolverConfig {
                goal_on_generation,
                ..SolverConfig::default()
            };
            let ok = solve_str(level, HeuristicKind::Navigation, &config);
            assert_eq!(ok.outcome, SearchOutcome::Solved);
            assert_eq!(ok.depth(), Some(1));
            assert_eq!(ok.moves.as_ref().unwrap().move_cnt(), 0);
            assert_eq!(ok.num_nodes, 1);
        }
    }

    #[test]
    fn box_in_corner() {
        let ok = solve_str(CORNER, HeuristicKind::Null, &config(Mode::Push));
        assert_eq!(ok.outcome, SearchOutcome::Exhausted);
        assert!(ok.path_states.is_none());
        assert!(ok.moves.is_none());
        assert_eq!(ok.num_nodes, 7);
        assert_eq!(format!("{:?}", ok).lines().next(), Some("No solution"));

        // pulling gets it out
        let ok = solve_str(CORNER, HeuristicKind::Null, &config(Mode::Pull));
        assert_eq!(moves_str(&ok), "lurrdllur");
    }

    #[test]
    fn goal_on_generation() {
        let config = SolverConfig {
            goal_on_generation: true,
            ..SolverConfig::default()
        };
        let ok = solve_str(ROOM, HeuristicKind::Null, &config);
        assert_eq!(moves_str(&ok), "rdldr");
        assert_eq!(ok.iterations, 22);
        assert_eq!(ok.stats.total_created(), 38);
    }

    #[test]
    fn iteration_limit() {
        let config = SolverConfig {
            max_iters: 5,
            ..SolverConfig::default()
        };
        let ok = solve_str(TWO_BOXES, HeuristicKind::Null, &config);
        assert_eq!(ok.outcome, SearchOutcome::LimitReached);
        assert_eq!(ok.iterations, 5);
        assert!(ok.moves.is_none());
        assert_eq!(ok.stats.total_expanded(), 5);

        let config = SolverConfig {
            max_iters: 0,
            ..SolverConfig::default()
        };
        let ok = solve_str(ROOM, HeuristicKind::Null, &config);
        assert_eq!(ok.outcome, SearchOutcome::LimitReached);
        assert_eq!(ok.num_nodes, 1);
    }

    #[test]
    fn invalid_start() {
        let level = r"
6 3
######
#po..#
######
";
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(
            puzzle
                .solve(HeuristicKind::Null, &SolverConfig::default())
                .unwrap_err(),
            SolverErr::InvalidStart
        );
    }

    /// Wildly overestimates everywhere except on one long detour.
    #[derive(Debug)]
    struct Misleading;

    impl Heuristic for Misleading {
        fn evaluate(&mut self, state: &State) -> u32 {
            if state.player_pos().y == 1 {
                0
            } else {
                20
            }
        }
    }

    #[test]
    fn inadmissible_heuristic_still_solves() {
        let puzzle: Puzzle = ROOM.parse().unwrap();
        let ok = solve_with(
            &puzzle,
            HeuristicKind::Other,
            Box::new(Misleading),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_eq!(ok.outcome, SearchOutcome::Solved);
        assert!(ok.moves.as_ref().unwrap().move_cnt() >= 5);
        let rules = PuzzleRules::new(&puzzle.map);
        assert!(rules.is_goal(ok.path_states.as_ref().unwrap().last().unwrap()));
    }
}
