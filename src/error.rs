//! Error types for board input and solver configuration.
//!
//! The search engine itself has no error channel: a run ends finished, and
//! possibly failed. These errors cover everything around it.

use thiserror::Error;

/// Failure to build a board from text.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Board has no rows")]
    Empty,

    #[error("Row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnknownTile { ch: char, row: usize, col: usize },

    #[error("Invalid board dimensions {rows}x{cols}")]
    Dimensions { rows: usize, cols: usize },

    #[error("Color count must be between 1 and {max}, got {found}")]
    ColorCount { max: usize, found: usize },
}

/// Failure to load or validate a solver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
