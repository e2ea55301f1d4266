//! Maze layouts: text parsing and the built-in layout set.
//!
//! A layout is a rectangle of characters, top row first:
//!
//! - `%` wall
//! - `.` food
//! - `o` capsule
//! - `P` Pacman start (exactly one)
//! - `G` ghost start (any number)
//! - ` ` empty floor

use std::path::Path;
use std::str::FromStr;

use crate::constants::{CAPSULE, EMPTY, FOOD, GHOST, PACMAN, WALL};
use crate::error::{Error, Result};
use crate::grid::{Grid, Position};

/// Built-in layouts, looked up by name.
pub const BUILTIN_LAYOUTS: &[(&str, &str)] = &[
    ("tinyMaze", TINY_MAZE),
    ("tinyCorners", TINY_CORNERS),
    ("tinySearch", TINY_SEARCH),
    ("minimaxClassic", MINIMAX_CLASSIC),
    ("testClassic", TEST_CLASSIC),
];

pub const TINY_MAZE: &str = "\
%%%%%%%
%    P%
% %%% %
%  %  %
%%   %%
%. %%%%
%%%%%%%";

pub const TINY_CORNERS: &str = "\
%%%%%%%%
%.    .%
%   P  %
% %%%% %
% %    %
% % %%%%
%.%   .%
%%%%%%%%";

pub const TINY_SEARCH: &str = "\
%%%%%
%.P %
%%% %
%.  %
%%%%%";

pub const MINIMAX_CLASSIC: &str = "\
%%%%%%%%%
%.P    G%
% %.%%% %
%   o   %
%%%%%%%%%";

pub const TEST_CLASSIC: &str = "\
%%%%%
% . %
%.G.%
% . %
%. .%
%   %
%  .%
%   %
%P .%
%%%%%";

/// A parsed maze: static walls plus the initial placement of food and agents.
#[derive(Clone, Debug)]
pub struct Layout {
    pub walls: Grid<bool>,
    pub food: Grid<bool>,
    pub capsules: Vec<Position>,
    pub pacman_start: Position,
    pub ghost_starts: Vec<Position>,
}

impl Layout {
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    /// Load a built-in layout by name, or else read a layout file from disk.
    pub fn load(name: &str) -> Result<Self> {
        if let Some((_, text)) = BUILTIN_LAYOUTS.iter().find(|(n, _)| *n == name) {
            return text.parse();
        }

        let path = Path::new(name);
        if !path.is_file() {
            return Err(Error::UnknownLayout {
                name: name.to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read layout {}", path.display()),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(invalid("layout is empty"));
        }
        let height = rows.len();
        let width = rows[0].chars().count();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.chars().count() != width) {
            return Err(invalid(&format!(
                "row {i} has {} columns, expected {width}: '{row}'",
                row.chars().count()
            )));
        }

        let mut walls = Grid::new(width, height, false);
        let mut food = Grid::new(width, height, false);
        let mut capsules = Vec::new();
        let mut pacman_start = None;
        let mut ghost_starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            // The first text row is the top of the maze.
            let y = height - 1 - row;
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    WALL => walls[(x, y)] = true,
                    FOOD => food[(x, y)] = true,
                    CAPSULE => capsules.push((x, y)),
                    PACMAN => {
                        if pacman_start.replace((x, y)).is_some() {
                            return Err(invalid("more than one Pacman start"));
                        }
                    }
                    GHOST => ghost_starts.push((x, y)),
                    EMPTY => {}
                    other => {
                        return Err(invalid(&format!("unexpected character '{other}' at ({x}, {y})")));
                    }
                }
            }
        }

        let pacman_start = pacman_start.ok_or_else(|| invalid("no Pacman start"))?;

        Ok(Layout {
            walls,
            food,
            capsules,
            pacman_start,
            ghost_starts,
        })
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidLayout {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiny_maze() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        assert_eq!(layout.width(), 7);
        assert_eq!(layout.height(), 7);
        assert_eq!(layout.pacman_start, (5, 5));
        assert_eq!(layout.food.as_list(), vec![(1, 1)]);
        assert!(layout.ghost_starts.is_empty());
        assert!(layout.walls[(0, 0)]);
        assert!(!layout.walls[(1, 5)]);
    }

    #[test]
    fn test_parse_agents_and_capsules() {
        let layout: Layout = MINIMAX_CLASSIC.parse().unwrap();
        assert_eq!(layout.pacman_start, (2, 3));
        assert_eq!(layout.ghost_starts, vec![(7, 3)]);
        assert_eq!(layout.capsules, vec![(4, 1)]);
        assert_eq!(layout.food.count(), 2);
    }

    #[test]
    fn test_all_builtins_parse() {
        for (name, _) in BUILTIN_LAYOUTS {
            assert!(Layout::load(name).is_ok(), "{name} should parse");
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = "%%%\n%P\n%%%".parse::<Layout>().unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { .. }));
    }

    #[test]
    fn test_missing_pacman_rejected() {
        let err = "%%%\n%.%\n%%%".parse::<Layout>().unwrap_err();
        assert!(err.to_string().contains("no Pacman"));
    }

    #[test]
    fn test_two_pacmen_rejected() {
        assert!("%%%%\n%PP%\n%%%%".parse::<Layout>().is_err());
    }

    #[test]
    fn test_unknown_character_rejected() {
        assert!("%%%\n%P%\n%x%\n%%%".parse::<Layout>().is_err());
    }

    #[test]
    fn test_unknown_layout_name() {
        let err = Layout::load("noSuchLayout").unwrap_err();
        assert!(matches!(err, Error::UnknownLayout { .. }));
    }
}
