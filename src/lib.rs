//! Pacman-Search: classic graph search and game-tree agents for a Pacman maze.
//!
//! This crate provides generic uninformed and informed graph search
//! (depth-first, breadth-first, uniform-cost, A*), adversarial game-tree
//! agents (minimax, alpha-beta, expectimax), and the Pacman problems,
//! heuristics and evaluation functions they are exercised on.
//!
//! ## Modules
//!
//! - [`constants`] - Scoring rules and search defaults
//! - [`error`] - Library error type
//! - [`directions`] - The `Direction` action token
//! - [`grid`] - 2D grids for walls and food
//! - [`layout`] - Maze layout parsing and built-in layouts
//! - [`fringe`] - Stack, queue and stable priority queue
//! - [`search`] - The `SearchProblem` trait and the four graph searches
//! - [`distance`] - Manhattan and maze distances
//! - [`problems`] - Position, corners and food problems with their heuristics
//! - [`game`] - The `GameState` and `Agent` traits and a turn scheduler
//! - [`pacman`] - A Pacman game engine implementing `GameState`
//! - [`multiagent`] - Minimax, alpha-beta, expectimax, reflex and ghost agents
//! - [`evaluation`] - State evaluation functions
//! - [`agents`] - Agents that plan with graph search
//!
//! ## Example
//!
//! ```
//! use pacman_search::layout::Layout;
//! use pacman_search::pacman::PacmanState;
//! use pacman_search::problems::PositionSearchProblem;
//! use pacman_search::search::breadth_first_search;
//!
//! let layout = Layout::load("tinyMaze").unwrap();
//! let state = PacmanState::new(&layout);
//!
//! // Shortest route from Pacman to the bottom-left square
//! let problem = PositionSearchProblem::from_state(&state);
//! let path = breadth_first_search(&problem);
//! assert_eq!(path.len(), 8);
//! ```

pub mod agents;
pub mod constants;
pub mod directions;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod fringe;
pub mod game;
pub mod grid;
pub mod layout;
pub mod multiagent;
pub mod pacman;
pub mod problems;
pub mod search;
