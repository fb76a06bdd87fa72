use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::islands::{FloodState, IslandGraph};

/// Counts the distinct colors among islands the flood region has not absorbed.
///
/// A paint absorbs islands of a single color, so at most one color can vanish
/// per move: the count never overestimates the moves left.
///
/// # Arguments
/// * `graph`: The island graph of the board being solved.
/// * `state`: The flood state to estimate from.
///
/// # Returns
/// The number of colors still outside the flood region.
pub fn remaining_colors(graph: &IslandGraph, state: &FloodState) -> u32 {
    let colors: BTreeSet<_> = (0..graph.len())
        .filter(|&id| !state.absorbed().contains(id))
        .map(|id| graph.island(id).color)
        .collect();
    colors.len() as u32
}

/// Finds the largest island-graph distance between the flood region and any
/// island it has not absorbed.
///
/// Every paint pulls the region at most one hop closer to each island, so this
/// never overestimates either.
///
/// # Arguments
/// * `graph`: The island graph of the board being solved.
/// * `state`: The flood state to estimate from.
///
/// # Returns
/// The eccentricity of the flood region; 0 once the board is flooded.
pub fn max_distance(graph: &IslandGraph, state: &FloodState) -> u32 {
    graph
        .distances(state)
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0) as u32
}

/// Counts the islands the flood region has not absorbed.
///
/// One paint can absorb several islands, so this may overestimate; it is a
/// strong guide for greedy search but breaks A*'s optimality guarantee.
pub fn remaining_islands(graph: &IslandGraph, state: &FloodState) -> u32 {
    (graph.len() - state.absorbed().len()) as u32
}

/// The heuristic a Flood-It problem reports to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// No estimate; informed strategies see h(n) = 0.
    None,
    /// [`remaining_colors`].
    Colors,
    /// [`max_distance`].
    Distance,
    /// The larger of `Colors` and `Distance`.
    #[default]
    Combined,
    /// [`remaining_islands`]. Not admissible.
    Islands,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::None,
        HeuristicKind::Colors,
        HeuristicKind::Distance,
        HeuristicKind::Combined,
        HeuristicKind::Islands,
    ];

    /// Whether the estimate never exceeds the true number of moves left.
    pub fn is_admissible(self) -> bool {
        self != HeuristicKind::Islands
    }

    /// Estimates the moves left from `state`, or `None` for [`HeuristicKind::None`].
    pub fn estimate(self, graph: &IslandGraph, state: &FloodState) -> Option<u32> {
        match self {
            HeuristicKind::None => None,
            HeuristicKind::Colors => Some(remaining_colors(graph, state)),
            HeuristicKind::Distance => Some(max_distance(graph, state)),
            HeuristicKind::Combined => {
                Some(remaining_colors(graph, state).max(max_distance(graph, state)))
            }
            HeuristicKind::Islands => Some(remaining_islands(graph, state)),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeuristicKind::None => "none",
            HeuristicKind::Colors => "colors",
            HeuristicKind::Distance => "distance",
            HeuristicKind::Combined => "combined",
            HeuristicKind::Islands => "islands",
        };
        f.write_str(name)
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown heuristic '{}'", s))
    }
}
