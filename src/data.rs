use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// A cell coordinate - `x` grows to the right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// The direction of a single step from `self` to `other`, if they're adjacent.
    pub fn dir_to(self, other: Pos) -> Option<Dir> {
        DIRECTIONS.iter().cloned().find(|&dir| self + dir == other)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// Successors are always generated in this order.
pub const DIRECTIONS: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Dir::Left => 'l',
            Dir::Right => 'r',
            Dir::Up => 'u',
            Dir::Down => 'd',
        }
    }

    pub fn from_char(c: char) -> Option<Dir> {
        match c {
            'l' => Some(Dir::Left),
            'r' => Some(Dir::Right),
            'u' => Some(Dir::Up),
            'd' => Some(Dir::Down),
            _ => None,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dx, dy) = dir.delta();
        Pos::new(self.x + dx, self.y + dy)
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving() {
        let pos = Pos::new(3, 5);
        assert_eq!(pos + Dir::Left, Pos::new(2, 5));
        assert_eq!(pos + Dir::Right, Pos::new(4, 5));
        assert_eq!(pos + Dir::Up, Pos::new(3, 4));
        assert_eq!(pos + Dir::Down, Pos::new(3, 6));
        for &dir in &DIRECTIONS {
            assert_eq!(pos + dir - dir, pos);
            assert_eq!(pos.dir_to(pos + dir), Some(dir));
        }
        assert_eq!(pos.dir_to(pos), None);
        assert_eq!(pos.dir_to(Pos::new(4, 6)), None);
    }

    #[test]
    fn manhattan() {
        assert_eq!(Pos::new(1, 1).dist(Pos::new(4, 3)), 5);
        assert_eq!(Pos::new(4, 3).dist(Pos::new(1, 1)), 5);
        assert_eq!(Pos::new(-2, 0).dist(Pos::new(2, 0)), 4);
    }

    #[test]
    fn dir_chars() {
        for &dir in &DIRECTIONS {
            assert_eq!(Dir::from_char(dir.to_char()), Some(dir));
        }
        assert_eq!(Dir::from_char('x'), None);
        assert_eq!(Dir::from_char('L'), None);
    }
}
