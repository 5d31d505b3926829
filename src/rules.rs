use crate::config::Mode;
use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::{Map, PuzzleMap};
use crate::state::State;

/// Legal moves, goal test and successor generation.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleRules<'a> {
    map: &'a PuzzleMap,
}

impl<'a> PuzzleRules<'a> {
    pub fn new(map: &'a PuzzleMap) -> Self {
        PuzzleRules { map }
    }

    pub fn map(&self) -> &'a PuzzleMap {
        self.map
    }

    /// Moves the player one step in `dir`, possibly pushing (or in pull mode pulling) one box.
    ///
    /// Returns `None` if the move is illegal.
    pub fn perform_action(&self, state: &State, dir: Dir, mode: Mode) -> Option<State> {
        let new_player_pos = state.player_pos + dir;
        if !self.map.is_free(new_player_pos) {
            return None;
        }

        let mut new_boxes = state.boxes.clone();
        if let Some(box_index) = state.box_at(new_player_pos) {
            let push_dest = new_player_pos + dir;
            if !self.is_legal_box_move(state, box_index, push_dest) {
                return None;
            }
            new_boxes[box_index] = push_dest;
        } else if mode == Mode::Pull {
            let behind = state.player_pos - dir;
            if let Some(box_index) = state.box_at(behind) {
                // the box ends up where the player stood
                let pull_dest = state.player_pos;
                if !self.is_legal_box_move(state, box_index, pull_dest) {
                    return None;
                }
                new_boxes[box_index] = pull_dest;
            }
        }

        Some(State::new(new_player_pos, new_boxes))
    }

    pub fn successors(&self, state: &State, mode: Mode) -> Vec<State> {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.perform_action(state, dir, mode))
            .collect()
    }

    /// All boxes are on goals.
    ///
    /// This checks boxes, not goals, but since a valid state has as many boxes as goals
    /// it's the same thing.
    pub fn is_goal(&self, state: &State) -> bool {
        state.boxes.iter().all(|&b| self.map.is_goal(b)) && self.is_valid(state)
    }

    pub fn is_valid(&self, state: &State) -> bool {
        if self.map.is_obstacle(state.player_pos) {
            return false;
        }
        for (i, &b) in state.boxes.iter().enumerate() {
            if self.map.is_obstacle(b) || b == state.player_pos {
                return false;
            }
            if state.boxes[i + 1..].contains(&b) {
                return false;
            }
        }
        state.boxes.len() == self.map.goals().len()
    }

    fn is_legal_box_move(&self, state: &State, box_index: usize, dest: Pos) -> bool {
        self.map.is_free(dest)
            && state
                .boxes
                .iter()
                .enumerate()
                .all(|(i, &b)| i == box_index || b != dest)
    }
}
