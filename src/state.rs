use crate::data::Pos;

/// Player and box positions.
///
/// Box order is part of the identity - two states with the same boxes
/// listed in a different order are different states. Rules never reorder
/// boxes so every box keeps its index for the whole search.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, boxes: Vec<Pos>) -> State {
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    /// Index of the box on `pos`.
    ///
    /// Panics if there's more than one - that can only happen if some code
    /// created an invalid state and continuing the search would give garbage.
    pub(crate) fn box_at(&self, pos: Pos) -> Option<usize> {
        let mut found = None;
        for (i, &b) in self.boxes.iter().enumerate() {
            if b == pos {
                assert!(
                    found.is_none(),
                    "More than one box on {}: {:?}",
                    pos,
                    self.boxes
                );
                found = Some(i);
            }
        }
        found
    }
}
