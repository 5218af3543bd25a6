//! Error module - recoverable engine failures
//!
//! Caller bugs (out-of-range coordinates, performing an illegal swap) panic.
//! The variants here cover bad input and fill loops that hit their ceiling.

use std::fmt;

/// Errors reported by level construction and the fill/resolve loops
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The level definition cannot describe a board
    InvalidDefinition(String),
    /// A restored layout does not fit the level
    InvalidLayout(String),
    /// No acceptable symbol was found for a cell within the re-roll ceiling
    RerollExhausted { column: usize, row: usize },
    /// No board with a legal swap was produced within the shuffle ceiling
    ShuffleExhausted { attempts: u32 },
    /// Cascades kept producing chains past the pass ceiling
    CascadeLimit { passes: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::InvalidDefinition(msg) => write!(f, "invalid level definition: {}", msg),
            LevelError::InvalidLayout(msg) => write!(f, "invalid layout: {}", msg),
            LevelError::RerollExhausted { column, row } => write!(
                f,
                "no symbol avoids an immediate chain at ({}, {})",
                column, row
            ),
            LevelError::ShuffleExhausted { attempts } => {
                write!(f, "no playable board after {} shuffles", attempts)
            }
            LevelError::CascadeLimit { passes } => {
                write!(f, "cascade still producing chains after {} passes", passes)
            }
        }
    }
}

impl std::error::Error for LevelError {}
