use std::fmt::{self, Debug, Display, Formatter};

use crate::map::PuzzleMap;
use crate::state::State;

/// Prints every state of a solution, separated by empty lines.
pub struct SolutionFormatter<'a> {
    map: &'a PuzzleMap,
    states: &'a [State],
}

impl<'a> SolutionFormatter<'a> {
    pub fn new(map: &'a PuzzleMap, states: &'a [State]) -> Self {
        Self { map, states }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (step, state) in self.states.iter().enumerate() {
            writeln!(f, "Step {}", step)?;
            writeln!(f, "{}", self.map.format_with_state(state))?;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
