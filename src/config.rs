//! Solver configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Command-line flags in the binaries are applied on
//! top of whatever is loaded here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Board, Tile};
use crate::error::{BoardError, ConfigError};
use crate::heuristics::HeuristicKind;
use crate::strategy::Strategy;

/// Top-level configuration shared by the binaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Search strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Heuristic reported by the Flood-It problem.
    #[serde(default)]
    pub heuristic: HeuristicKind,

    /// `tracing-subscriber` filter directive, e.g. `gps_solver=debug`.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Shape of generated boards.
    #[serde(default)]
    pub random_board: RandomBoardConfig,
}

/// Parameters for [`Board::new_random_with_seed`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RandomBoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub colors: usize,
    pub seed: u64,
}

impl Default for RandomBoardConfig {
    fn default() -> Self {
        RandomBoardConfig {
            rows: 6,
            cols: 6,
            colors: 4,
            seed: 0,
        }
    }
}

impl RandomBoardConfig {
    pub fn generate(&self) -> Result<Board, BoardError> {
        Board::new_random_with_seed(self.rows, self.cols, self.colors, self.seed)
    }
}

impl SolverConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, isn't valid TOML, or holds
    /// values [`SolverConfig::validate`] rejects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Picks the `tracing-subscriber` filter for a binary.
    ///
    /// A non-empty `rust_log` (the `RUST_LOG` variable) wins. Otherwise
    /// `verbose` selects `gps_solver=debug`, then `log_filter` applies, and
    /// `default` is the fallback.
    pub fn log_directives(&self, rust_log: Option<&str>, verbose: bool, default: &str) -> String {
        match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
            Some(directives) => directives.to_string(),
            None if verbose => "gps_solver=debug".to_string(),
            None => self
                .log_filter
                .clone()
                .unwrap_or_else(|| default.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.random_board;
        if board.rows == 0 || board.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "random_board must be at least 1x1, got {}x{}",
                board.rows, board.cols
            )));
        }
        if !(2..=Tile::ALL.len()).contains(&board.colors) {
            return Err(ConfigError::Invalid(format!(
                "random_board.colors must be between 2 and {}, got {}",
                Tile::ALL.len(),
                board.colors
            )));
        }
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid("log_filter is empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
            strategy = "astar"
            heuristic = "distance"
            log_filter = "gps_solver=debug"

            [random_board]
            rows = 8
            cols = 10
            colors = 5
            seed = 7
        "#;

        let config = SolverConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.strategy, Strategy::Astar);
        assert_eq!(config.heuristic, HeuristicKind::Distance);
        assert_eq!(config.log_filter.as_deref(), Some("gps_solver=debug"));
        assert_eq!(
            config.random_board,
            RandomBoardConfig {
                rows: 8,
                cols: 10,
                colors: 5,
                seed: 7
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.strategy, Strategy::Bfs);
        assert_eq!(config.heuristic, HeuristicKind::Combined);
        assert_eq!(config.random_board.rows, 6);
        assert_eq!(config.random_board.colors, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_board_section() {
        let config = SolverConfig::from_toml_str("[random_board]\nseed = 99\n").unwrap();
        assert_eq!(config.random_board.seed, 99);
        assert_eq!(config.random_board.cols, 6);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = SolverConfig::from_toml_str(r#"strategy = "dijkstra""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects_bad_board() {
        let mut config = SolverConfig::default();
        config.random_board.colors = 7;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.random_board.colors = 3;
        config.random_board.rows = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("0x6"));
    }

    #[test]
    fn test_generate_is_seeded() {
        let board = RandomBoardConfig::default();
        assert_eq!(board.generate().unwrap(), board.generate().unwrap());
    }

    #[test]
    fn test_log_directives_precedence() {
        let mut config = SolverConfig::default();
        assert_eq!(config.log_directives(None, false, "gps_solver=info"), "gps_solver=info");
        assert_eq!(config.log_directives(Some(""), true, "gps_solver=info"), "gps_solver=debug");

        config.log_filter = Some("gps_solver=trace".to_string());
        assert_eq!(config.log_directives(None, false, "gps_solver=info"), "gps_solver=trace");
        assert_eq!(config.log_directives(None, true, "gps_solver=info"), "gps_solver=debug");
        assert_eq!(config.log_directives(Some("warn"), true, "gps_solver=info"), "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SolverConfig::load("/nonexistent/gps_solver.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
