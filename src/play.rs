use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::config::Mode;
use crate::data::Dir;
use crate::map_formatter::MapFormatter;
use crate::puzzle::Puzzle;
use crate::rules::PuzzleRules;
use crate::state::State;

pub const HELP: &str = "l=left,r=right,u=up,d=down,b=back,f=forward,1=reset,q=quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Back,
    Forward,
    Reset,
    Quit,
}

impl Command {
    pub fn from_char(c: char) -> Option<Command> {
        match c {
            'b' => Some(Command::Back),
            'f' => Some(Command::Forward),
            '1' => Some(Command::Reset),
            'q' => Some(Command::Quit),
            _ => Dir::from_char(c).map(Command::Move),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayErr {
    InvalidMove(Dir),
    AtStart,
    AtEnd,
}

impl Display for PlayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            PlayErr::InvalidMove(dir) => write!(f, "Invalid move {}", dir.to_char()),
            PlayErr::AtStart => write!(f, "Can't go backward any more"),
            PlayErr::AtEnd => write!(f, "Can't go forward any more"),
        }
    }
}

impl Error for PlayErr {}

/// Manual stepping through a puzzle with undo/redo history.
#[derive(Debug, Clone)]
pub struct Play<'a> {
    rules: PuzzleRules<'a>,
    mode: Mode,
    states: Vec<State>,
    cur: usize,
}

impl<'a> Play<'a> {
    pub fn new(puzzle: &'a Puzzle, mode: Mode) -> Self {
        Self {
            rules: PuzzleRules::new(&puzzle.map),
            mode,
            states: vec![puzzle.state.clone()],
            cur: 0,
        }
    }

    /// Applies one command. `Quit` is left to the caller and does nothing here.
    ///
    /// A move made after going back throws away the forward history.
    pub fn perform(&mut self, cmd: Command) -> Result<(), PlayErr> {
        match cmd {
            Command::Move(dir) => {
                let next = self
                    .rules
                    .perform_action(self.current(), dir, self.mode)
                    .ok_or(PlayErr::InvalidMove(dir))?;
                self.states.truncate(self.cur + 1);
                self.states.push(next);
                self.cur += 1;
            }
            Command::Back => {
                if self.cur == 0 {
                    return Err(PlayErr::AtStart);
                }
                self.cur -= 1;
            }
            Command::Forward => {
                if self.cur + 1 >= self.states.len() {
                    return Err(PlayErr::AtEnd);
                }
                self.cur += 1;
            }
            Command::Reset => self.cur = 0,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Runs the contents of a path file through `perform`.
    ///
    /// Whitespace is skipped, invalid characters and moves are logged and skipped.
    /// Returns the number of commands that failed.
    pub fn replay(&mut self, commands: &str) -> usize {
        let mut failed = 0;
        for c in commands.chars().filter(|c| !c.is_whitespace()) {
            let cmd = match Command::from_char(c) {
                Some(cmd) => cmd,
                None => {
                    warn!("Invalid command {}", c);
                    failed += 1;
                    continue;
                }
            };
            if let Err(err) = self.perform(cmd) {
                warn!("{}", err);
                failed += 1;
            }
        }
        failed
    }

    pub fn current(&self) -> &State {
        &self.states[self.cur]
    }

    /// Index of the current state in the history
    pub fn step(&self) -> usize {
        self.cur
    }

    pub fn is_finished(&self) -> bool {
        self.rules.is_goal(self.current())
    }

    pub fn format(&self) -> MapFormatter<'_> {
        self.rules.map().format_with_state(&self.states[self.cur])
    }
}
