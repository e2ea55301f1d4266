//! Movement directions, which double as the action tokens of every agent.

use std::fmt;

use crate::grid::Position;

/// A move on the grid. `Stop` leaves the agent in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moving directions, in successor-generation order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// All directions including `Stop`.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// Unit step `(dx, dy)`; north increases `y`.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    /// Apply this step to a position. Returns `None` below the origin.
    pub fn apply(self, (x, y): Position) -> Option<Position> {
        let (dx, dy) = self.vector();
        Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn test_apply() {
        assert_eq!(Direction::North.apply((2, 2)), Some((2, 3)));
        assert_eq!(Direction::West.apply((2, 2)), Some((1, 2)));
        assert_eq!(Direction::West.apply((0, 2)), None);
        assert_eq!(Direction::Stop.apply((0, 0)), Some((0, 0)));
    }
}
