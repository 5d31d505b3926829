use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::Pos;
use crate::map_formatter::MapFormatter;
use crate::state::State;

/// Read-only view of the static part of a level.
///
/// Every predicate is a hash lookup or a comparison so it's fine to call them
/// with coordinates far outside the grid - they just evaluate to `false`.
pub trait Map {
    fn grid(&self) -> &GridMap;

    fn width(&self) -> i32 {
        self.grid().width
    }

    fn height(&self) -> i32 {
        self.grid().height
    }

    /// Cells in the first row and column are considered out of bounds.
    /// Levels are surrounded by walls anyway so this never matters for real maps.
    fn is_in_bounds(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x < self.width() && pos.y < self.height()
    }

    fn is_obstacle(&self, pos: Pos) -> bool {
        self.grid().obstacles.contains(&pos)
    }

    /// In bounds and not an obstacle
    fn is_free(&self, pos: Pos) -> bool {
        self.is_in_bounds(pos) && !self.is_obstacle(pos)
    }

    fn coord_to_index(&self, pos: Pos) -> i32 {
        pos.y * self.width() + pos.x
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    obstacles: FnvHashSet<Pos>,
}

impl GridMap {
    /// Obstacles outside the `width` x `height` rectangle are dropped.
    pub fn new<I>(width: i32, height: i32, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Pos>,
    {
        let obstacles = obstacles
            .into_iter()
            .filter(|pos| pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height)
            .collect();
        GridMap {
            width,
            height,
            obstacles,
        }
    }

    pub fn obstacle_cnt(&self) -> usize {
        self.obstacles.len()
    }

    /// All cells, row by row
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }
}

impl Map for GridMap {
    fn grid(&self) -> &GridMap {
        self
    }
}

impl Debug for GridMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = if self.is_obstacle(Pos::new(x, y)) { '#' } else { ' ' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Grid with goals. Goals are never obstacles.
#[derive(Clone, PartialEq, Eq)]
pub struct PuzzleMap {
    grid: GridMap,
    goals: Vec<Pos>,
    goal_set: FnvHashSet<Pos>,
}

impl PuzzleMap {
    pub fn new(grid: GridMap, goals: Vec<Pos>) -> Self {
        assert!(
            goals.iter().all(|goal| !grid.is_obstacle(*goal)),
            "Goal on an obstacle"
        );
        let goal_set = goals.iter().cloned().collect();
        PuzzleMap {
            grid,
            goals,
            goal_set,
        }
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.goal_set.contains(&pos)
    }

    /// Goals in row-major order as they appeared in the map file
    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state))
    }
}

impl Map for PuzzleMap {
    fn grid(&self) -> &GridMap {
        &self.grid
    }
}

impl Display for PuzzleMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MapFormatter::new(self, None))
    }
}

impl Debug for PuzzleMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
