//! # GPS Solver Library
//!
//! A general problem solver: a single search engine that explores any
//! problem exposed through the [`problem::Problem`] and [`problem::Rule`]
//! traits, with five interchangeable strategies (BFS, DFS, IDDFS, A* and
//! greedy best-first).
//!
//! The crate ships Flood-It as its demonstration domain. It is used by three
//! binaries:
//! - `ai_solver`: Solves a board from a file or a seeded random board with a
//!   chosen strategy and heuristic, and reports the paints and search stats.
//! - `human_player`: Allows interactive gameplay via the command line, with
//!   undo and A*-backed hints.
//! - `heuristic_evaluator`: Compares strategies and heuristics over many
//!   seeded random boards.
//!
//! ## Modules
//! - `problem`: The `Problem` and `Rule` contracts, and the closure-backed `FnRule`.
//! - `node`: `SearchNode`, one point of the search tree with its parent chain.
//! - `strategy`: The `Strategy` enum and its evaluation function.
//! - `solver`: `SearchEngine`, the strategy-driven search loop.
//! - `engine`: The Flood-It board (`Board`), tile colors (`Tile`) and interactive `Game`.
//! - `islands`: The island graph of a board and the `FloodState` used as search state.
//! - `heuristics`: Flood-It estimates of the paints left.
//! - `puzzle`: `FloodItProblem`, which plugs a board into the engine.
//! - `utils`: Board parsing from text rows and files.
//! - `config`: TOML configuration for the binaries.
//! - `error`: Error types.

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod islands;
pub mod node;
pub mod problem;
pub mod puzzle;
pub mod solver;
pub mod strategy;
pub mod utils;
