use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::fs;

use crate::map::PuzzleMap;
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::LoadPuzzle;

/// A map and the initial state.
#[derive(Clone)]
pub struct Puzzle {
    pub map: PuzzleMap,
    pub state: State,
}

impl Puzzle {
    pub fn new(map: PuzzleMap, state: State) -> Self {
        Puzzle { map, state }
    }

    pub fn format(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.map, Some(&self.state))
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl Debug for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.format())
    }
}

impl LoadPuzzle for str {
    fn load_puzzle(&self) -> Result<Puzzle, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        Ok(text.parse()?)
    }
}
