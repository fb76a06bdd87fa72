//! Contracts between the search engine and a concrete problem domain.
//!
//! The engine never looks inside a state: it only clones, hashes and compares
//! them, asks the problem whether a state is a goal, and applies the problem's
//! rules to produce successors.

use std::fmt;
use std::hash::Hash;

/// A state-transition operator.
///
/// Applying a rule to a state either yields the successor state together with
/// a non-negative cost, or `None` when the rule is inapplicable to that state.
pub trait Rule<S> {
    /// Human-readable rule name, used when printing solution paths.
    fn name(&self) -> &str;

    /// Applies the rule to `state`.
    fn apply(&self, state: &S) -> Option<(S, u32)>;
}

/// An abstract search problem.
///
/// `State` equality and hashing must be well defined: the engine uses states
/// as keys of its closed map and relies on that contract for deduplication.
pub trait Problem {
    type State: Clone + Eq + Hash + fmt::Debug;

    /// The state every pass starts from.
    fn initial_state(&self) -> Self::State;

    /// Goal predicate.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Rules in significant order: it fixes child generation order, and with
    /// it the tie-break order inside a frontier batch.
    fn rules(&self) -> &[Box<dyn Rule<Self::State>>];

    /// Estimated remaining cost from `state`. `None` means no estimate and is
    /// treated as zero.
    fn heuristic(&self, _state: &Self::State) -> Option<u32> {
        None
    }
}

/// A rule backed by a closure.
///
/// # Examples
///
/// ```
/// use gps_solver::problem::{FnRule, Rule};
///
/// let double = FnRule::new("double", |n: &u64| Some((n * 2, 1)));
/// assert_eq!(double.apply(&4), Some((8, 1)));
/// assert_eq!(double.name(), "double");
/// ```
pub struct FnRule<S, F>
where
    F: Fn(&S) -> Option<(S, u32)>,
{
    name: String,
    apply: F,
    _state: std::marker::PhantomData<fn(&S) -> S>,
}

impl<S, F> FnRule<S, F>
where
    F: Fn(&S) -> Option<(S, u32)>,
{
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        FnRule {
            name: name.into(),
            apply,
            _state: std::marker::PhantomData,
        }
    }
}

impl<S, F> Rule<S> for FnRule<S, F>
where
    F: Fn(&S) -> Option<(S, u32)>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, state: &S) -> Option<(S, u32)> {
        (self.apply)(state)
    }
}

impl<S, F> fmt::Debug for FnRule<S, F>
where
    F: Fn(&S) -> Option<(S, u32)>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}
