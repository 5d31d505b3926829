// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod play;
pub mod puzzle;
pub mod rules;
pub mod solution_formatter;
pub mod solver;
pub mod state;
pub mod vec2d;

mod parser;

use std::error::Error;

pub use crate::config::{HeuristicKind, Mode, SolverConfig};
pub use crate::parser::ParserErr;
pub use crate::puzzle::Puzzle;
pub use crate::solver::{SearchOutcome, SolverErr, SolverOk};

pub trait LoadPuzzle {
    fn load_puzzle(&self) -> Result<Puzzle, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, heuristic: HeuristicKind, config: &SolverConfig) -> Result<SolverOk, SolverErr>;
}
