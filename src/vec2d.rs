use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Dense grid, row-major (`y * width + x`).
#[derive(Clone, PartialEq, Eq)]
pub struct Vec2d<T> {
    data: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Clone> Vec2d<T> {
    pub(crate) fn new(width: i32, height: i32, default: T) -> Self {
        assert!(width >= 0 && height >= 0, "Negative grid size");
        Vec2d {
            data: vec![default; (width * height) as usize],
            width,
            height,
        }
    }
}

impl<T> Vec2d<T> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Index into the underlying storage or `None` if `pos` is outside the grid.
    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            None
        } else {
            Some((pos.y * self.width + pos.x) as usize)
        }
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.index_of(pos).map(|i| &self.data[i])
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        let index = self
            .index_of(pos)
            .unwrap_or_else(|| panic!("{} is outside the grid", pos));
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let index = self
            .index_of(pos)
            .unwrap_or_else(|| panic!("{} is outside the grid", pos));
        &mut self.data[index]
    }
}

impl Display for Vec2d<Option<u32>> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.data.chunks(self.width as usize) {
            for cell in row {
                match cell {
                    Some(dist) => write!(f, "{:>3}", dist)?,
                    None => write!(f, "{:>3}", '-')?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One row per line
impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.data.chunks(self.width as usize) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dir;

    #[test]
    fn indexing() {
        let mut grid = Vec2d::new(4, 3, None);
        grid[Pos::new(3, 2)] = Some(7);
        grid[Pos::new(0, 0)] = Some(0);
        assert_eq!(grid.index_of(Pos::new(3, 2)), Some(11));
        assert_eq!(grid.index_of(Pos::new(1, 1)), Some(5));
        assert_eq!(grid.index_of(Pos::new(4, 0)), None);
        assert_eq!(grid.index_of(Pos::new(0, -1)), None);
        assert_eq!(grid.get(Pos::new(3, 2)), Some(&Some(7)));
        assert_eq!(grid.get(Pos::new(-1, 2)), None);
        assert_eq!(grid.positions().count(), 12);
        assert_eq!(grid.positions().nth(5), Some(Pos::new(1, 1)));

        let expected = "  0  -  -  -\n  -  -  -  -\n  -  -  -  7\n";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn debug_any_cells() {
        let mut grid = Vec2d::new(2, 2, None);
        grid[Pos::new(1, 0)] = Some(Dir::Left);
        assert_eq!(format!("{:?}", grid), "[None, Some(Left)]\n[None, None]\n");

        let empty: Vec2d<bool> = Vec2d::new(0, 3, false);
        assert_eq!(format!("{:?}", empty), "");
    }

    #[test]
    #[should_panic]
    fn indexing_outside() {
        let grid = Vec2d::new(2, 2, false);
        let _ = grid[Pos::new(2, 0)];
    }
}
