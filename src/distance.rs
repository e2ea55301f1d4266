//! Distances between grid squares.

use crate::grid::{Grid, Position};
use crate::problems::{PositionSearchProblem, unit_cost};
use crate::search::breadth_first_search;

/// Manhattan (taxicab) distance.
pub fn manhattan(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Length of the shortest walk from `a` to `b` that avoids walls.
///
/// Both squares must be open. If `b` cannot be reached the result is 0,
/// the same as for `a == b`.
pub fn maze(a: Position, b: Position, walls: &Grid<bool>) -> usize {
    debug_assert!(!walls.is_set(a), "maze: {a:?} is a wall");
    debug_assert!(!walls.is_set(b), "maze: {b:?} is a wall");

    let problem = PositionSearchProblem::new(walls, a, b, unit_cost);
    breadth_first_search(&problem).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Layout, TINY_MAZE};

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((1, 1), (4, 5)), 7);
        assert_eq!(manhattan((4, 5), (1, 1)), 7);
        assert_eq!(manhattan((2, 2), (2, 2)), 0);
    }

    #[test]
    fn test_maze_respects_walls() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        let d = maze(layout.pacman_start, (1, 1), &layout.walls);
        assert_eq!(d, 8);
        assert!(d > manhattan(layout.pacman_start, (1, 1)));
    }

    #[test]
    fn test_maze_same_square() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        assert_eq!(maze((1, 1), (1, 1), &layout.walls), 0);
    }
}
