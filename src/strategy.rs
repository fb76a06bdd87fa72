//! Search strategies supported by the engine.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The algorithm variant driving frontier order, admission and depth bounds.
///
/// # Examples
///
/// ```
/// use gps_solver::strategy::Strategy;
///
/// let strategy: Strategy = "astar".parse().unwrap();
/// assert_eq!(strategy, Strategy::Astar);
/// assert!(strategy.is_informed());
/// assert_eq!(strategy.to_string(), "ASTAR");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Breadth-first search.
    #[default]
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Iterative-deepening depth-first search.
    Iddfs,
    /// A* search, f(n) = g(n) + h(n).
    Astar,
    /// Greedy best-first search, f(n) = h(n).
    Greedy,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Iddfs,
        Strategy::Astar,
        Strategy::Greedy,
    ];

    /// Whether f(n) depends on the problem's heuristic.
    pub fn is_informed(self) -> bool {
        matches!(self, Strategy::Astar | Strategy::Greedy)
    }

    /// Whether the run re-explores under growing depth bounds.
    pub fn is_iterative(self) -> bool {
        self == Strategy::Iddfs
    }

    /// The evaluation function f(n) given g(n) and h(n). A missing heuristic
    /// counts as zero.
    pub fn evaluate(self, cost: u32, heuristic: Option<u32>) -> u64 {
        let h = u64::from(heuristic.unwrap_or(0));
        match self {
            Strategy::Bfs | Strategy::Dfs | Strategy::Iddfs => u64::from(cost),
            Strategy::Astar => u64::from(cost) + h,
            Strategy::Greedy => h,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Iddfs => "IDDFS",
            Strategy::Astar => "ASTAR",
            Strategy::Greedy => "GREEDY",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accepts "A*" and "a-star" spellings as well.
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "iddfs" => Ok(Strategy::Iddfs),
            "astar" | "a*" => Ok(Strategy::Astar),
            "greedy" => Ok(Strategy::Greedy),
            _ => Err(format!("Unknown strategy '{}'", s)),
        }
    }
}
