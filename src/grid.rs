use std::fmt;
use std::ops::{Index, IndexMut};

/// A square on the grid as `(x, y)`, with `(0, 0)` at the bottom left.
pub type Position = (usize, usize);

/// A rectangular grid of cells, indexed by `(x, y)`.
///
/// Used for walls and food. Out-of-range reads through [`Grid::get`] return `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, (x, y): Position) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[self.idx(x, y)])
    }
}

impl Grid<bool> {
    /// Positions of all `true` cells, column by column.
    pub fn as_list(&self) -> Vec<Position> {
        let mut out = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                if self[(x, y)] {
                    out.push((x, y));
                }
            }
        }
        out
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether `pos` is set. Off-grid squares count as set, so walls stay closed.
    pub fn is_set(&self, pos: Position) -> bool {
        self.get(pos).copied().unwrap_or(true)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): Position) -> &T {
        &self.cells[self.idx(x, y)]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, (x, y): Position) -> &mut T {
        let i = self.idx(x, y);
        &mut self.cells[i]
    }
}

impl fmt::Display for Grid<bool> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let ch = if self[(x, y)] { 'T' } else { 'F' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_list_and_count() {
        let mut g = Grid::new(3, 2, false);
        g[(2, 1)] = true;
        g[(0, 0)] = true;
        assert_eq!(g.count(), 2);
        assert_eq!(g.as_list(), vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn test_off_grid_is_set() {
        let g = Grid::new(2, 2, false);
        assert!(!g.is_set((1, 1)));
        assert!(g.is_set((2, 0)));
        assert!(g.get((0, 5)).is_none());
    }

    #[test]
    fn test_display_top_row_first() {
        let mut g = Grid::new(2, 2, false);
        g[(0, 1)] = true;
        assert_eq!(g.to_string(), "TF\nFF\n");
    }
}
