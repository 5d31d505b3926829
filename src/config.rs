use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Boxes can only be pushed.
    Push,
    /// Boxes can be pushed and pulled (useful when searching backwards).
    Pull,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Push => write!(f, "push"),
            Mode::Pull => write!(f, "pull"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Null,
    /// Greedy matching of boxes to goals - *not admissible*,
    /// solutions found with it are not guaranteed to be optimal.
    Manhattan,
    Navigation,
    CachedNavigation,
    Other,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::Null,
        HeuristicKind::Manhattan,
        HeuristicKind::Navigation,
        HeuristicKind::CachedNavigation,
        HeuristicKind::Other,
    ];

    /// Digits 0-4 as used on the command line.
    pub fn from_digit(c: char) -> Option<HeuristicKind> {
        c.to_digit(10)
            .and_then(|d| HeuristicKind::ALL.get(d as usize))
            .cloned()
    }

    pub fn is_admissible(self) -> bool {
        self != HeuristicKind::Manhattan
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Null => write!(f, "Null"),
            HeuristicKind::Manhattan => write!(f, "ManhattanDistance"),
            HeuristicKind::Navigation => write!(f, "NavigationDistance"),
            HeuristicKind::CachedNavigation => write!(f, "CachedNavigationDistance"),
            HeuristicKind::Other => write!(f, "Other"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub mode: Mode,
    /// Upper bound on search steps (node expansions).
    pub max_iters: usize,
    /// Print progress every `print_iters` steps, 0 disables it.
    pub print_iters: usize,
    /// Test successors for goal as soon as they're generated.
    /// Faster but the solution might not be optimal.
    pub goal_on_generation: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            mode: Mode::Push,
            max_iters: 100_000,
            print_iters: 0,
            goal_on_generation: false,
        }
    }
}
