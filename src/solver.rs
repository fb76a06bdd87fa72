//! The general problem solver: one search engine, five strategies.
//!
//! Every strategy shares the same pass loop and node-expansion path; the
//! [`Strategy`] only changes
//! - whether the outer loop deepens a depth bound (IDDFS),
//! - which nodes are admitted for expansion,
//! - which end of the frontier children are pushed to, and
//! - the evaluation function used to order a batch of children.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::{debug, info, trace};

use crate::node::SearchNode;
use crate::problem::Problem;
use crate::strategy::Strategy;

type NodeRef<S> = Rc<SearchNode<S>>;

/// Searches a [`Problem`] for a path from its initial state to a goal state.
///
/// # Examples
///
/// ```
/// use gps_solver::problem::{FnRule, Problem, Rule};
/// use gps_solver::solver::SearchEngine;
/// use gps_solver::strategy::Strategy;
///
/// struct Reach10 {
///     rules: Vec<Box<dyn Rule<u64>>>,
/// }
///
/// impl Problem for Reach10 {
///     type State = u64;
///     fn initial_state(&self) -> u64 { 1 }
///     fn is_goal(&self, n: &u64) -> bool { *n == 10 }
///     fn rules(&self) -> &[Box<dyn Rule<u64>>] { &self.rules }
/// }
///
/// let problem = Reach10 {
///     rules: vec![
///         Box::new(FnRule::new("increment", |n: &u64| Some((n + 1, 1)))),
///         Box::new(FnRule::new("double", |n: &u64| Some((n * 2, 1)))),
///     ],
/// };
/// let mut engine = SearchEngine::new(problem, Strategy::Bfs);
/// engine.run();
/// assert!(engine.is_finished() && !engine.is_failed());
/// assert_eq!(engine.solution_node().unwrap().depth(), 4);
/// ```
pub struct SearchEngine<P: Problem> {
    problem: P,
    strategy: Strategy,
    frontier: VecDeque<NodeRef<P::State>>,
    closed: HashMap<P::State, u32>,
    solution: Option<NodeRef<P::State>>,
    explosions: u64,
    finished: bool,
    failed: bool,
}

impl<P: Problem> SearchEngine<P> {
    pub fn new(problem: P, strategy: Strategy) -> Self {
        SearchEngine {
            problem,
            strategy,
            frontier: VecDeque::new(),
            closed: HashMap::new(),
            solution: None,
            explosions: 0,
            finished: false,
            failed: false,
        }
    }

    /// Runs the search to completion.
    ///
    /// Blocks until the run is finished: either a goal was found or the
    /// reachable space was exhausted. Strategies that are not complete for the
    /// problem at hand (DFS, GREEDY on infinite or cyclic spaces) may never
    /// return. Calling `run` again starts over from scratch.
    pub fn run(&mut self) {
        self.solution = None;
        self.explosions = 0;
        self.finished = false;
        self.failed = false;

        info!(event = "search_start", strategy = %self.strategy);

        if self.strategy.is_iterative() {
            let mut max_depth = 0usize;
            while !self.finished {
                self.pass(max_depth);
                max_depth = max_depth.saturating_add(1);
            }
        } else {
            // The bound is never reached, so a single pass always finishes.
            self.pass(usize::MAX);
        }

        info!(
            event = "search_end",
            strategy = %self.strategy,
            explosions = self.explosions,
            finished = self.finished,
            failed = self.failed,
            solution_cost = self.solution.as_ref().map(|n| n.cost()),
            solution_depth = self.solution.as_ref().map(|n| n.depth()),
        );
    }

    /// One exploration pass bounded by `max_depth`.
    ///
    /// Nodes deeper than the bound are still goal-tested but never expanded.
    /// A pass that drains the frontier without ever meeting the bound has
    /// explored the whole reachable space, which makes the failure final.
    fn pass(&mut self, max_depth: usize) {
        self.closed.clear();
        self.frontier.clear();
        self.frontier
            .push_back(Rc::new(SearchNode::root(self.problem.initial_state())));

        let mut bound_hit = false;

        while let Some(node) = self.frontier.pop_front() {
            let depth = node.depth();
            if depth > max_depth {
                bound_hit = true;
            }
            if self.problem.is_goal(node.state()) {
                self.solution = Some(node);
                self.finished = true;
                self.log_pass(max_depth, bound_hit);
                return;
            }
            if depth <= max_depth {
                self.expand(&node);
            }
        }

        if !bound_hit {
            self.failed = true;
            self.finished = true;
        }
        self.log_pass(max_depth, bound_hit);
    }

    /// Admits and expands one popped node according to the strategy.
    ///
    /// DFS and IDDFS push the children to the head in reverse rule order, so
    /// the first rule's child is popped first. Pushing them in rule order
    /// would pop the last rule's child first instead, which changes both the
    /// path found and the explosion count.
    fn expand(&mut self, node: &NodeRef<P::State>) {
        match self.strategy {
            Strategy::Bfs => {
                if self.closed.contains_key(node.state()) {
                    return;
                }
                let children = self.explode(node);
                self.frontier.extend(children);
            }
            Strategy::Dfs | Strategy::Iddfs => {
                if !self.is_best(node) {
                    return;
                }
                let children = self.explode(node);
                // The first rule's child ends up at the head and is popped first.
                for child in children.into_iter().rev() {
                    self.frontier.push_front(child);
                }
            }
            Strategy::Astar => {
                if !self.is_best(node) {
                    return;
                }
                self.enqueue_sorted(node);
            }
            Strategy::Greedy => self.enqueue_sorted(node),
        }
    }

    /// Sorts this node's children by f(n) and appends them to the tail.
    ///
    /// Only the new batch is ordered; nodes queued by earlier expansions keep
    /// their place ahead of it. The sort is stable, so children with equal
    /// evaluation stay in rule order.
    fn enqueue_sorted(&mut self, node: &NodeRef<P::State>) {
        let mut children: Vec<(u64, NodeRef<P::State>)> = self
            .explode(node)
            .into_iter()
            .map(|child| (self.evaluation(&child), child))
            .collect();
        children.sort_by_key(|(f, _)| *f);
        self.frontier
            .extend(children.into_iter().map(|(_, child)| child));
    }

    /// Counts the expansion, closes the node's state at its cost, and applies
    /// every rule to generate the children in rule order.
    fn explode(&mut self, node: &NodeRef<P::State>) -> Vec<NodeRef<P::State>> {
        self.explosions += 1;
        self.closed.insert(node.state().clone(), node.cost());
        trace!(
            event = "expand",
            explosion = self.explosions,
            depth = node.depth(),
            cost = node.cost(),
        );

        self.problem
            .rules()
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                rule.apply(node.state()).map(|(state, cost)| {
                    Rc::new(SearchNode::child(
                        state,
                        node.cost().saturating_add(cost),
                        Rc::clone(node),
                        index,
                    ))
                })
            })
            .collect()
    }

    /// True when the node's state is new this pass, or was closed at a
    /// strictly higher cost.
    fn is_best(&self, node: &SearchNode<P::State>) -> bool {
        self.closed
            .get(node.state())
            .map_or(true, |&closed_cost| node.cost() < closed_cost)
    }

    fn evaluation(&self, node: &SearchNode<P::State>) -> u64 {
        let heuristic = if self.strategy.is_informed() {
            self.problem.heuristic(node.state())
        } else {
            None
        };
        self.strategy.evaluate(node.cost(), heuristic)
    }

    fn log_pass(&self, max_depth: usize, bound_hit: bool) {
        debug!(
            event = "pass_end",
            strategy = %self.strategy,
            max_depth = max_depth,
            bound_hit = bound_hit,
            explosions = self.explosions,
            frontier_len = self.frontier.len(),
            closed_len = self.closed.len(),
        );
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Nodes generated but not yet expanded. After a successful run this holds
    /// whatever was still queued when the goal was popped.
    pub fn frontier(&self) -> &VecDeque<NodeRef<P::State>> {
        &self.frontier
    }

    /// Best cost at which each state was expanded during the last pass.
    pub fn closed(&self) -> &HashMap<P::State, u32> {
        &self.closed
    }

    /// Number of node expansions performed by the last run, across all passes.
    pub fn explosion_count(&self) -> u64 {
        self.explosions
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True when the run finished without a solution.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn solution_node(&self) -> Option<&NodeRef<P::State>> {
        self.solution.as_ref()
    }

    /// Nodes from the initial state to the goal, inclusive.
    pub fn solution_path(&self) -> Option<Vec<NodeRef<P::State>>> {
        self.solution.as_ref().map(|node| node.path())
    }
}
