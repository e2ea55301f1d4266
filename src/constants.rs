//! Constants for scoring rules, search defaults and sentinel values.
//!
//! This module contains the fixed configuration of the engine. Run-time knobs
//! (layout, depth, evaluation function, seed) come from the command line and
//! fall back to the defaults below.

// =============================================================================
// Scoring Rules
// =============================================================================

/// Points lost for every Pacman move, including `Stop`.
pub const TIME_PENALTY: f64 = 1.0;

/// Points for eating a food pellet.
pub const FOOD_REWARD: f64 = 10.0;

/// Bonus for clearing the board of food.
pub const WIN_REWARD: f64 = 500.0;

/// Points lost when a ghost catches Pacman.
pub const LOSE_PENALTY: f64 = 500.0;

/// Points for eating a scared ghost.
pub const GHOST_EAT_REWARD: f64 = 200.0;

/// Number of ghost moves a capsule keeps ghosts scared for.
pub const SCARED_TIME: u32 = 40;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default ply depth for the game-tree agents.
pub const DEFAULT_DEPTH: usize = 2;

/// Default cap on the number of agent moves in a game.
pub const DEFAULT_MAX_MOVES: usize = 1000;

/// Cost reported for an action sequence that is missing or walks into a wall.
pub const NO_PATH_COST: f64 = 999999.0;

/// Default goal of a position search problem.
pub const DEFAULT_GOAL: (usize, usize) = (1, 1);

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Penalty for sitting on or next to a dangerous ghost.
pub const GHOST_NEAR_PENALTY: f64 = 100.0;

/// Reflex penalty for a move that leaves Pacman where it was.
pub const REFLEX_STOP_PENALTY: f64 = 100.0;

/// Reflex penalty for a move that lands on or next to any ghost.
pub const REFLEX_GHOST_PENALTY: f64 = 1000.0;

/// Reflex score for a move that eats the last pellet.
pub const REFLEX_CLEAR_SCORE: f64 = 1000.0;

// =============================================================================
// Layout Characters
// =============================================================================

/// Wall square.
pub const WALL: char = '%';

/// Food pellet.
pub const FOOD: char = '.';

/// Power capsule.
pub const CAPSULE: char = 'o';

/// Pacman start.
pub const PACMAN: char = 'P';

/// Ghost start.
pub const GHOST: char = 'G';

/// Empty floor.
pub const EMPTY: char = ' ';
