use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::Pos;
use crate::map::{GridMap, PuzzleMap};
use crate::puzzle::Puzzle;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Header,
    Height { expected: i32, got: i32 },
    Width { line: i32, expected: i32, got: i32 },
    Pos(i32, i32),
    MultiplePlayers,
    NoPlayer,
    NoBoxes,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Header => write!(f, "First line must be `<width> <height>`"),
            ParserErr::Height { expected, got } => {
                write!(f, "Incorrect height - expected {} lines, got {}", expected, got)
            }
            ParserErr::Width {
                line,
                expected,
                got,
            } => write!(
                f,
                "Incorrect width on line {} - expected {} cells, got {}",
                line, expected, got
            ),
            ParserErr::Pos(x, y) => write!(f, "Invalid cell at pos: [{}, {}]", x, y),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::NoBoxes => write!(f, "No boxes"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Puzzle {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the map format:
///
/// ```text
/// <width> <height>
/// `height` lines of exactly `width` cells:
///   '#' obstacle, 'o' box, 'p' player, '.' goal,
///   '@' box on goal, '8' player on goal, ' ' floor
/// ```
pub(crate) fn parse(text: &str) -> Result<Puzzle, ParserErr> {
    // allow levels in raw strings that start on a new line
    let mut lines = text.trim_start_matches('\n').lines();

    let (width, height) = parse_header(lines.next().ok_or(ParserErr::Header)?)?;

    let mut obstacles = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for y in 0..height {
        let line = lines.next().ok_or(ParserErr::Height {
            expected: height,
            got: y,
        })?;

        let mut x = 0;
        for c in line.chars() {
            let pos = Pos::new(x, y);
            match c {
                '#' => obstacles.push(pos),
                'o' => boxes.push(pos),
                'p' | '8' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    if c == '8' {
                        goals.push(pos);
                    }
                }
                '@' => {
                    boxes.push(pos);
                    goals.push(pos);
                }
                '.' => goals.push(pos),
                ' ' => {}
                _ => return Err(ParserErr::Pos(x, y)),
            }
            x += 1;
        }

        if x != width {
            return Err(ParserErr::Width {
                line: y,
                expected: width,
                got: x,
            });
        }
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if boxes.is_empty() {
        return Err(ParserErr::NoBoxes);
    }
    if boxes.len() != goals.len() {
        // not fatal, such a level just can't be solved
        warn!(
            "Number of goals ({}) does not match number of boxes ({})",
            goals.len(),
            boxes.len()
        );
    }

    let map = PuzzleMap::new(GridMap::new(width, height, obstacles), goals);
    Ok(Puzzle::new(map, State::new(player_pos, boxes)))
}

fn parse_header(line: &str) -> Result<(i32, i32), ParserErr> {
    let mut parts = line.split_whitespace();
    let mut next_size = || -> Result<i32, ParserErr> {
        let size = parts
            .next()
            .ok_or(ParserErr::Header)?
            .parse::<i32>()
            .map_err(|_| ParserErr::Header)?;
        if size <= 0 {
            return Err(ParserErr::Header);
        }
        Ok(size)
    };
    let width = next_size()?;
    let height = next_size()?;
    if parts.next().is_some() {
        return Err(ParserErr::Header);
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Map;

    #[test]
    fn simplest() {
        let level = r"
5 3
#####
#po.#
#####
";
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(puzzle.map.width(), 5);
        assert_eq!(puzzle.map.height(), 3);
        assert_eq!(puzzle.map.grid().obstacle_cnt(), 12);
        assert_eq!(puzzle.map.goals(), &[Pos::new(3, 1)]);
        assert_eq!(puzzle.state.player_pos(), Pos::new(1, 1));
        assert_eq!(puzzle.state.boxes(), &[Pos::new(2, 1)]);
    }

    #[test]
    fn goal_markers() {
        let level = r"
6 3
######
#8@o.#
######
";
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(
            puzzle.map.goals(),
            &[Pos::new(1, 1), Pos::new(2, 1), Pos::new(4, 1)]
        );
        assert_eq!(puzzle.state.player_pos(), Pos::new(1, 1));
        assert_eq!(puzzle.state.boxes(), &[Pos::new(2, 1), Pos::new(3, 1)]);
    }

    #[test]
    fn extra_lines_are_ignored() {
        let level = "5 3\n#####\n#po.#\n#####\nwhatever\n";
        assert!(level.parse::<Puzzle>().is_ok());
    }

    #[test]
    fn windows_line_endings() {
        let level = "5 3\r\n#####\r\n#po.#\r\n#####\r\n";
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(puzzle.state.boxes(), &[Pos::new(2, 1)]);
    }

    #[test]
    fn fail_header() {
        assert_failure("", ParserErr::Header);
        assert_failure("5\n#####\n", ParserErr::Header);
        assert_failure("5 x\n#####\n", ParserErr::Header);
        assert_failure("5 -3\n#####\n", ParserErr::Header);
        assert_failure("5 0\n", ParserErr::Header);
        assert_failure("5 3 1\n#####\n", ParserErr::Header);
    }

    #[test]
    fn fail_height() {
        let level = r"
5 4
#####
#po.#
#####
";
        assert_failure(
            level,
            ParserErr::Height {
                expected: 4,
                got: 3,
            },
        );
    }

    #[test]
    fn fail_width() {
        let level = r"
5 3
#####
#po.##
#####
";
        assert_failure(
            level,
            ParserErr::Width {
                line: 1,
                expected: 5,
                got: 6,
            },
        );
        let level = r"
5 3
#####
#po.
#####
";
        assert_failure(
            level,
            ParserErr::Width {
                line: 1,
                expected: 5,
                got: 4,
            },
        );
    }

    #[test]
    fn fail_pos() {
        let level = r"
5 3
#####
#pX.#
#####
";
        assert_failure(level, ParserErr::Pos(2, 1));
    }

    #[test]
    fn fail_players() {
        let level = r"
5 3
#####
#po8#
#####
";
        assert_failure(level, ParserErr::MultiplePlayers);
        let level = r"
5 3
#####
# o.#
#####
";
        assert_failure(level, ParserErr::NoPlayer);
    }

    #[test]
    fn fail_no_boxes() {
        let level = r"
5 3
#####
#p..#
#####
";
        assert_failure(level, ParserErr::NoBoxes);
    }

    #[test]
    fn mismatched_goals_still_load() {
        let level = r"
5 3
#####
#poo#
#####
";
        let puzzle: Puzzle = level.parse().unwrap();
        assert!(puzzle.map.goals().is_empty());
        assert_eq!(puzzle.state.boxes().len(), 2);
    }

    fn assert_failure(input_level: &str, expected_err: ParserErr) {
        assert_eq!(input_level.parse::<Puzzle>().unwrap_err(), expected_err);
    }
}
