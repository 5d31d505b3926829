use std::collections::VecDeque;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Map;
use crate::vec2d::Vec2d;

/// What is being moved around the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mover {
    /// Moves to any free neighbor.
    Player,
    /// Moves along an axis only if the cells on both sides along that axis are free -
    /// one is the destination, the other is where the player has to stand.
    Box,
    /// Moves like `Box` or by being pulled - then the destination and the cell
    /// beyond it must be free.
    PullableBox,
}

/// Shortest paths from one cell to all others, ignoring boxes.
///
/// All edges have the same cost so this is just BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    start: Pos,
    dists: Vec2d<Option<u32>>,
    /// The last move on the shortest path to each cell
    from_dirs: Vec2d<Option<Dir>>,
}

impl ShortestPaths {
    pub fn new<M: Map>(map: &M, start: Pos, mover: Mover) -> Self {
        let mut dists = Vec2d::new(map.width(), map.height(), None);
        let mut from_dirs = Vec2d::new(map.width(), map.height(), None);

        if dists.index_of(start).is_none() {
            // nothing is reachable from outside the grid
            return Self {
                start,
                dists,
                from_dirs,
            };
        }

        dists[start] = Some(0);
        let mut to_visit = VecDeque::new();
        to_visit.push_back(start);

        while let Some(cur) = to_visit.pop_front() {
            let next_dist = dists[cur].map_or(0, |d| d + 1);
            for &dir in &DIRECTIONS {
                let next = cur + dir;
                let passable = match mover {
                    Mover::Player => map.is_free(next),
                    Mover::Box => map.is_free(next) && map.is_free(cur - dir),
                    Mover::PullableBox => {
                        map.is_free(next) && (map.is_free(cur - dir) || map.is_free(next + dir))
                    }
                };
                if !passable {
                    continue;
                }
                // is_free implies the position is inside the grid
                let relax = match dists[next] {
                    None => true,
                    Some(d) => d > next_dist,
                };
                if relax {
                    dists[next] = Some(next_dist);
                    from_dirs[next] = Some(dir);
                    to_visit.push_back(next);
                }
            }
        }

        Self {
            start,
            dists,
            from_dirs,
        }
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    /// Number of moves from start to `pos` or `None` if unreachable.
    pub fn dist(&self, pos: Pos) -> Option<u32> {
        self.dists.get(pos).cloned().unwrap_or(None)
    }

    /// The move that entered `pos` on a shortest path - `None` for start and unreachable cells.
    pub fn from_dir(&self, pos: Pos) -> Option<Dir> {
        self.from_dirs.get(pos).cloned().unwrap_or(None)
    }

    /// Reconstructs the moves from start to `pos` by walking back along `from_dir`.
    pub fn path_to(&self, pos: Pos) -> Option<Vec<Dir>> {
        self.dist(pos)?;

        let mut moves = Vec::new();
        let mut cur = pos;
        while let Some(dir) = self.from_dir(cur) {
            moves.push(dir);
            cur = cur - dir;
        }
        debug_assert_eq!(cur, self.start);
        moves.reverse();
        Some(moves)
    }

    /// Minimal distance to any of `targets`.
    pub fn min_dist<I>(&self, targets: I) -> Option<u32>
    where
        I: IntoIterator<Item = Pos>,
    {
        min_dist(&self.dists, targets)
    }

    pub fn dists(&self) -> &Vec2d<Option<u32>> {
        &self.dists
    }

    pub fn into_dists(self) -> Vec2d<Option<u32>> {
        self.dists
    }
}

pub(crate) fn min_dist<I>(dists: &Vec2d<Option<u32>>, targets: I) -> Option<u32>
where
    I: IntoIterator<Item = Pos>,
{
    targets
        .into_iter()
        .filter_map(|pos| dists.get(pos).cloned().unwrap_or(None))
        .min()
}
