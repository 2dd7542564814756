//! Core engine for a number-placement puzzle game supporting 4x4 and 9x9
//! boards.
//!
//! The board is a mapping from a composite coordinate key to a [`Node`];
//! [`Generator`] produces solvable, uniquely-determined puzzles and
//! [`is_complete`] decides whether a board state is a valid solution.

mod generator;
mod grid;
mod node;
mod puzzle;
mod solver;
mod validation;

pub use generator::Generator;
pub use grid::{box_size, neighbors, Neighbors};
pub use node::{node_key, Node};
pub use puzzle::{Difficulty, Puzzle};
pub use solver::Solver;
pub use validation::{is_complete, is_valid_partial};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Board size without an integer square root (only 4 and 9 are supported)
    InvalidBoundary(u8),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBoundary(b) => write!(f, "invalid board boundary: {}", b),
        }
    }
}

impl std::error::Error for CoreError {}
