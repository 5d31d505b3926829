use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovesErr {
    /// States `i` and `i + 1` are not one step apart
    NotAdjacent(usize),
}

impl Display for MovesErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MovesErr::NotAdjacent(i) => write!(
                f,
                "Player positions in states {} and {} are not adjacent",
                i,
                i + 1
            ),
        }
    }
}

impl Error for MovesErr {}

/// Player moves in the path file format - one of `lrud` per move.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Dir>);

impl Moves {
    pub fn new(moves: Vec<Dir>) -> Self {
        Moves(moves)
    }

    /// Infers the moves from player positions of consecutive states.
    pub fn from_states(states: &[State]) -> Result<Self, MovesErr> {
        states
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                pair[0]
                    .player_pos
                    .dir_to(pair[1].player_pos)
                    .ok_or(MovesErr::NotAdjacent(i))
            })
            .collect::<Result<_, _>>()
            .map(Moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Dir> {
        self.0.iter()
    }

    /// Contents of a path file
    pub fn to_path_file(&self) -> String {
        format!("{}\n", self)
    }
}

impl IntoIterator for Moves {
    type Item = Dir;
    type IntoIter = ::std::vec::IntoIter<Dir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Dir;
    type IntoIter = ::std::slice::Iter<'a, Dir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for dir in self {
            write!(f, "{}", dir.to_char())?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;

    #[test]
    fn formatting_moves() {
        let moves = Moves::new(vec![Dir::Up, Dir::Right, Dir::Down, Dir::Left]);
        assert_eq!(moves.to_string(), "urdl");
        assert_eq!(format!("{:?}", moves), "urdl");
        assert_eq!(moves.to_path_file(), "urdl\n");
        assert_eq!(Moves::default().to_path_file(), "\n");
    }

    #[test]
    fn from_states() {
        let boxes = vec![Pos::new(5, 5)];
        let states: Vec<_> = [(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)]
            .iter()
            .map(|&(x, y)| State::new(Pos::new(x, y), boxes.clone()))
            .collect();
        let moves = Moves::from_states(&states).unwrap();
        assert_eq!(moves.to_string(), "rdlu");
        assert_eq!(Moves::from_states(&states[..1]), Ok(Moves::default()));
        assert_eq!(Moves::from_states(&[]), Ok(Moves::default()));

        // (2, 1) -> (1, 2) is diagonal
        let broken = vec![states[0].clone(), states[1].clone(), states[3].clone()];
        assert_eq!(Moves::from_states(&broken), Err(MovesErr::NotAdjacent(1)));
        let standing = vec![states[0].clone(), states[0].clone()];
        assert_eq!(Moves::from_states(&standing), Err(MovesErr::NotAdjacent(0)));
    }

    #[test]
    fn iterating() {
        let v = vec![Dir::Up, Dir::Right, Dir::Down, Dir::Left];
        let moves = Moves::new(v.clone());

        let mut v2 = Vec::new();
        for &m in &moves {
            v2.push(m);
        }
        for &m in moves.iter() {
            v2.push(m);
        }
        for m in moves {
            v2.push(m);
        }

        assert_eq!(v2.len(), 12);
        for chunk in v2.chunks(4) {
            assert_eq!(chunk, &v[..]);
        }
    }
}
