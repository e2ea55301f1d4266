//! Error types for the library.
//!
//! Search failure is not an error: searches return an empty action list.
//! Errors here cover malformed input and agents that break the game rules.

use thiserror::Error;

use crate::directions::Direction;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("unknown layout '{name}'")]
    UnknownLayout { name: String },

    #[error("agent {agent} returned an illegal move: {action}")]
    IllegalAction { agent: usize, action: Direction },

    #[error("game has {expected} agents but {got} were supplied")]
    AgentCount { expected: usize, got: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
