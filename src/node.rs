//! Search tree nodes.

use std::rc::Rc;

/// A node of the search tree: a state, the cost of the path that reached it,
/// and a link to the node it was generated from.
///
/// Nodes form a tree even when states repeat; two nodes holding equal states
/// represent two different paths. The parent link is shared, so the chain
/// behind a node stays alive for as long as the node itself does.
#[derive(Debug)]
pub struct SearchNode<S> {
    state: S,
    cost: u32,
    parent: Option<Rc<SearchNode<S>>>,
    rule: Option<usize>,
}

impl<S> SearchNode<S> {
    /// Creates a root node (cost 0, no parent).
    pub fn root(state: S) -> Self {
        SearchNode {
            state,
            cost: 0,
            parent: None,
            rule: None,
        }
    }

    /// Creates a node generated from `parent` by the rule at index `rule`.
    pub fn child(state: S, cost: u32, parent: Rc<SearchNode<S>>, rule: usize) -> Self {
        SearchNode {
            state,
            cost,
            parent: Some(parent),
            rule: Some(rule),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Accumulated path cost, g(n).
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode<S>>> {
        self.parent.as_ref()
    }

    /// Index into the problem's rule list of the rule that produced this node.
    pub fn rule(&self) -> Option<usize> {
        self.rule
    }

    /// Number of edges between this node and the root. Not cached: walks the
    /// parent chain every call.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.as_deref();
        }
        depth
    }

    /// The chain of nodes from the root down to this one, inclusive.
    pub fn path(self: &Rc<Self>) -> Vec<Rc<SearchNode<S>>> {
        let mut path = vec![Rc::clone(self)];
        let mut current = self.parent.clone();
        while let Some(node) = current {
            current = node.parent.clone();
            path.push(node);
        }
        path.reverse();
        path
    }
}

impl<S> Drop for SearchNode<S> {
    // Unlinks the parent chain iteratively; the default drop would recurse
    // once per ancestor.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut owned) => owned.parent.take(),
                Err(_) => None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_depth_is_zero() {
        let root = SearchNode::root(1u32);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.cost(), 0);
        assert!(root.parent().is_none());
        assert!(root.rule().is_none());
    }

    #[test]
    fn test_depth_is_one_more_than_parent() {
        let root = Rc::new(SearchNode::root('a'));
        let b = Rc::new(SearchNode::child('b', 2, Rc::clone(&root), 0));
        let c = Rc::new(SearchNode::child('c', 5, Rc::clone(&b), 1));
        assert_eq!(b.depth(), root.depth() + 1);
        assert_eq!(c.depth(), b.depth() + 1);
        assert_eq!(c.cost(), 5);
        assert_eq!(c.rule(), Some(1));
    }

    #[test]
    fn test_path_runs_from_root() {
        let root = Rc::new(SearchNode::root(0));
        let mut tip = Rc::clone(&root);
        for i in 1..=4 {
            tip = Rc::new(SearchNode::child(i, i as u32, tip, 0));
        }
        let states: Vec<i32> = tip.path().iter().map(|n| *n.state()).collect();
        assert_eq!(states, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_chain_survives_dropped_ancestors() {
        let tip = {
            let root = Rc::new(SearchNode::root("root"));
            let mid = Rc::new(SearchNode::child("mid", 1, root, 0));
            Rc::new(SearchNode::child("tip", 2, mid, 0))
        };
        assert_eq!(tip.depth(), 2);
        assert_eq!(*tip.path()[0].state(), "root");
    }

    #[test]
    fn test_depth_of_deep_chain() {
        let mut tip = Rc::new(SearchNode::root(0u32));
        for i in 1..=100_000u32 {
            tip = Rc::new(SearchNode::child(i, i, tip, 0));
        }
        assert_eq!(tip.depth(), 100_000);
        drop(tip);
    }
}
