use std::fmt::Debug;

use fnv::FnvHashMap;

use crate::config::{HeuristicKind, Mode};
use crate::data::Pos;
use crate::map::PuzzleMap;
use crate::state::State;
use crate::vec2d::Vec2d;

use super::navigation::{self, Mover, ShortestPaths};

/// Added for each box that can't reach any goal - large enough to push such states
/// to the back of the queue, small enough not to overflow when summed.
pub const DEAD_BOX_COST: u32 = 1_000_000;

/// Estimates the number of moves left to reach a goal state (less is better).
///
/// A* only guarantees optimal solutions if the estimate never exceeds the real cost.
pub trait Heuristic: Debug {
    fn evaluate(&mut self, state: &State) -> u32;
}

pub fn create<'a>(kind: HeuristicKind, map: &'a PuzzleMap, mode: Mode) -> Box<dyn Heuristic + 'a> {
    match kind {
        HeuristicKind::Null => Box::new(NullHeuristic),
        HeuristicKind::Manhattan => Box::new(ManhattanHeuristic::new(map)),
        HeuristicKind::Navigation => Box::new(NavigationHeuristic::new(map, mode)),
        HeuristicKind::CachedNavigation => Box::new(NavigationHeuristic::cached(map, mode)),
        HeuristicKind::Other => Box::new(OtherHeuristic),
    }
}

/// Turns A* into uniform cost search.
#[derive(Debug, Clone, Copy)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    fn evaluate(&mut self, _state: &State) -> u32 {
        0
    }
}

/// Free slot for experiments.
#[derive(Debug, Clone, Copy)]
pub struct OtherHeuristic;

impl Heuristic for OtherHeuristic {
    fn evaluate(&mut self, _state: &State) -> u32 {
        0
    }
}

/// Greedily matches boxes to goals by Manhattan distance.
///
/// Starting at the player, take the nearest box that's not on a goal, then the nearest free goal
/// to that box, count their distance and continue from that goal.
///
/// **Not admissible** - the greedy matching can overestimate (or underestimate)
/// the optimal matching so solutions are not guaranteed to be optimal.
/// It's cheap though (no searching) and usually works well.
#[derive(Debug, Clone, Copy)]
pub struct ManhattanHeuristic<'a> {
    map: &'a PuzzleMap,
}

impl<'a> ManhattanHeuristic<'a> {
    pub fn new(map: &'a PuzzleMap) -> Self {
        Self { map }
    }
}

impl Heuristic for ManhattanHeuristic<'_> {
    fn evaluate(&mut self, state: &State) -> u32 {
        let mut free_goals: Vec<Pos> = self.map.goals().to_vec();
        for b in &state.boxes {
            if let Some(i) = free_goals.iter().position(|g| g == b) {
                free_goals.remove(i);
            }
        }
        let mut boxes: Vec<Pos> = state
            .boxes
            .iter()
            .cloned()
            .filter(|&b| !self.map.is_goal(b))
            .collect();

        let mut anchor = state.player_pos;
        let mut sum = 0;
        while let Some((box_index, _)) = nearest(anchor, &boxes) {
            let box_pos = boxes.remove(box_index);
            let (goal_index, dist) = match nearest(box_pos, &free_goals) {
                Some(found) => found,
                // more boxes than goals - the state is invalid anyway
                None => break,
            };
            sum += dist;
            anchor = free_goals.remove(goal_index);
        }
        sum
    }
}

/// Index and distance of the first closest position
fn nearest(from: Pos, positions: &[Pos]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &pos) in positions.iter().enumerate() {
        let dist = from.dist(pos);
        if best.map_or(true, |(_, min)| dist < min) {
            best = Some((i, dist));
        }
    }
    best
}

/// Uses real distances on the map (ignoring boxes) instead of Manhattan distance:
///
/// - the player has to walk next to some box: distance to the closest box minus one
/// - every box has to get to some goal: box distance to the closest goal,
///   where a box step needs the cell the player pushes from free
///   or in pull mode the two cells ahead free
///
/// Each move moves the player and at most one box so the sum never overestimates
/// and the heuristic is admissible in both modes.
///
/// The cached variant remembers the distance field for every start position,
/// the map never changes during a search so they stay valid.
/// The number of fields is bounded by the number of cells.
#[derive(Debug, Clone)]
pub struct NavigationHeuristic<'a> {
    map: &'a PuzzleMap,
    box_mover: Mover,
    cache: Option<NavigationCache>,
}

#[derive(Debug, Clone, Default)]
struct NavigationCache {
    player: FnvHashMap<Pos, Vec2d<Option<u32>>>,
    boxes: FnvHashMap<Pos, Vec2d<Option<u32>>>,
}

impl<'a> NavigationHeuristic<'a> {
    pub fn new(map: &'a PuzzleMap, mode: Mode) -> Self {
        let box_mover = match mode {
            Mode::Push => Mover::Box,
            Mode::Pull => Mover::PullableBox,
        };
        Self {
            map,
            box_mover,
            cache: None,
        }
    }

    pub fn cached(map: &'a PuzzleMap, mode: Mode) -> Self {
        Self {
            cache: Some(NavigationCache::default()),
            ..Self::new(map, mode)
        }
    }

    /// Number of distance fields remembered so far (player, box)
    pub fn cached_fields(&self) -> (usize, usize) {
        self.cache
            .as_ref()
            .map_or((0, 0), |cache| (cache.player.len(), cache.boxes.len()))
    }

    fn min_dist(&mut self, from: Pos, mover: Mover, targets: &[Pos]) -> Option<u32> {
        let map = self.map;
        let targets = targets.iter().cloned();
        match self.cache {
            Some(ref mut cache) => {
                let fields = match mover {
                    Mover::Player => &mut cache.player,
                    Mover::Box | Mover::PullableBox => &mut cache.boxes,
                };
                let dists = fields
                    .entry(from)
                    .or_insert_with(|| ShortestPaths::new(map, from, mover).into_dists());
                navigation::min_dist(dists, targets)
            }
            None => ShortestPaths::new(map, from, mover).min_dist(targets),
        }
    }
}

impl Heuristic for NavigationHeuristic<'_> {
    fn evaluate(&mut self, state: &State) -> u32 {
        let map = self.map;
        if state.boxes.iter().all(|&b| map.is_goal(b)) {
            return 0;
        }

        let to_box = self
            .min_dist(state.player_pos, Mover::Player, &state.boxes)
            .map_or(0, |dist| dist.saturating_sub(1));

        let box_mover = self.box_mover;
        state.boxes.iter().fold(to_box, |sum, &b| {
            let to_goal = self
                .min_dist(b, box_mover, map.goals())
                .unwrap_or(DEAD_BOX_COST);
            sum.saturating_add(to_goal)
        })
    }
}
