use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::Pos;
use crate::map::{Map, PuzzleMap};
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contents {
    Empty,
    Box,
    Player,
}

/// Prints the grid part of the map file format, optionally with a state on top.
pub struct MapFormatter<'a> {
    map: &'a PuzzleMap,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a PuzzleMap, state: Option<&'a State>) -> Self {
        Self { map, state }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let boxes: FnvHashSet<Pos> = self
            .state
            .map(|state| state.boxes.iter().cloned().collect())
            .unwrap_or_default();
        let player_pos = self.state.map(|state| state.player_pos);

        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                let pos = Pos::new(x, y);
                let contents = if player_pos == Some(pos) {
                    Contents::Player
                } else if boxes.contains(&pos) {
                    Contents::Box
                } else {
                    Contents::Empty
                };
                Self::write_cell(self.map, pos, contents, f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell(map: &PuzzleMap, pos: Pos, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        if map.is_obstacle(pos) {
            return write!(f, "#");
        }
        match (map.is_goal(pos), contents) {
            (false, Contents::Empty) => write!(f, " "),
            (false, Contents::Box) => write!(f, "o"),
            (false, Contents::Player) => write!(f, "p"),
            (true, Contents::Empty) => write!(f, "."),
            (true, Contents::Box) => write!(f, "@"),
            (true, Contents::Player) => write!(f, "8"),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Puzzle;

    #[test]
    fn formatting_round_trip() {
        let grid = r"
#######
#  .  #
# o@# #
#8  o #
#.    #
#######
"
        .trim_start_matches('\n');
        let level = format!("7 6\n{}", grid);
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(puzzle.to_string(), grid);
        assert_eq!(format!("{:?}", puzzle), grid);
        assert_eq!(puzzle.map.format_with_state(&puzzle.state).to_string(), grid);
    }

    #[test]
    fn formatting_without_state() {
        let level = r"
5 4
#####
#p@.#
# o #
#####
";
        let puzzle: Puzzle = level.parse().unwrap();
        assert_eq!(puzzle.map.to_string(), "#####\n# ..#\n#   #\n#####\n");
    }
}
