//! Flood-It as a search problem.
//!
//! States are [`FloodState`]s over the board's island graph, and every color
//! present on the board contributes one unit-cost paint rule.

use std::rc::Rc;

use crate::engine::{Board, Tile};
use crate::heuristics::HeuristicKind;
use crate::islands::{FloodState, IslandGraph};
use crate::problem::{Problem, Rule};
use crate::solver::SearchEngine;

/// Paints the flood region with one color.
#[derive(Debug)]
pub struct PaintRule {
    color: Tile,
    name: String,
    graph: Rc<IslandGraph>,
}

impl PaintRule {
    pub fn new(color: Tile, graph: Rc<IslandGraph>) -> Self {
        PaintRule {
            color,
            name: format!("paint {}", color),
            graph,
        }
    }

    pub fn color(&self) -> Tile {
        self.color
    }
}

impl Rule<FloodState> for PaintRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, state: &FloodState) -> Option<(FloodState, u32)> {
        self.graph.paint(state, self.color).map(|next| (next, 1))
    }
}

/// A Flood-It board ready to be handed to a [`SearchEngine`].
///
/// # Examples
///
/// ```
/// use gps_solver::heuristics::HeuristicKind;
/// use gps_solver::puzzle::{describe_path, FloodItProblem};
/// use gps_solver::solver::SearchEngine;
/// use gps_solver::strategy::Strategy;
/// use gps_solver::utils::board_from_str_array;
/// use gps_solver::engine::Tile;
///
/// let board = board_from_str_array(&["RGB", "GBB", "BBR"]).unwrap();
/// let problem = FloodItProblem::new(&board, HeuristicKind::Combined);
/// let mut engine = SearchEngine::new(problem, Strategy::Astar);
/// engine.run();
/// assert_eq!(
///     describe_path(&engine),
///     Some(vec![Tile::Green, Tile::Blue, Tile::Red])
/// );
/// ```
pub struct FloodItProblem {
    graph: Rc<IslandGraph>,
    rules: Vec<Box<dyn Rule<FloodState>>>,
    heuristic: HeuristicKind,
}

impl FloodItProblem {
    pub fn new(board: &Board, heuristic: HeuristicKind) -> Self {
        let graph = Rc::new(IslandGraph::from_board(board));
        let rules = board
            .colors_present()
            .into_iter()
            .map(|color| {
                Box::new(PaintRule::new(color, Rc::clone(&graph))) as Box<dyn Rule<FloodState>>
            })
            .collect();
        FloodItProblem {
            graph,
            rules,
            heuristic,
        }
    }

    pub fn graph(&self) -> &IslandGraph {
        &self.graph
    }

    pub fn heuristic_kind(&self) -> HeuristicKind {
        self.heuristic
    }
}

impl Problem for FloodItProblem {
    type State = FloodState;

    fn initial_state(&self) -> FloodState {
        self.graph.initial_state()
    }

    fn is_goal(&self, state: &FloodState) -> bool {
        self.graph.is_flooded(state)
    }

    fn rules(&self) -> &[Box<dyn Rule<FloodState>>] {
        &self.rules
    }

    fn heuristic(&self, state: &FloodState) -> Option<u32> {
        self.heuristic.estimate(&self.graph, state)
    }
}

/// The colors painted along the engine's solution, in order; `None` when the
/// engine has no solution.
pub fn describe_path(engine: &SearchEngine<FloodItProblem>) -> Option<Vec<Tile>> {
    engine
        .solution_path()
        .map(|path| path.iter().skip(1).map(|node| node.state().color()).collect())
}
