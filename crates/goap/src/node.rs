use std::rc::Rc;

use crate::clone::{CloneError, StateCloner};

/// One point on a candidate path: the world after applying one action.
///
/// Nodes are immutable once built. The parent link is a shared back-reference used for
/// backtracking; a node stays alive while a child, the expansion stack or the leaf queue still
/// holds it, and is dropped with the last of them.
#[derive(Debug)]
pub struct PlanNode<S> {
    state: S,
    action: Option<usize>,
    cost: f64,
    depth: usize,
    parent: Option<Rc<PlanNode<S>>>,
}

impl<S> PlanNode<S> {
    /// Builds a node holding a fresh copy of `state` made by `cloner`.
    pub fn new(
        parent: Option<Rc<PlanNode<S>>>,
        cost: f64,
        state: &S,
        action: Option<usize>,
        cloner: &dyn StateCloner<S>,
    ) -> Result<Self, CloneError> {
        Ok(Self::from_owned(parent, cost, cloner.clone_state(state)?, action))
    }

    /// Builds a node that takes ownership of `state`.
    ///
    /// Moving the value in gives the same exclusivity as a copy: the caller can no longer
    /// reach it.
    pub fn from_owned(
        parent: Option<Rc<PlanNode<S>>>,
        cost: f64,
        state: S,
        action: Option<usize>,
    ) -> Self {
        let depth = parent.as_ref().map_or(0, |p| p.depth + 1);
        Self {
            state,
            action,
            cost,
            depth,
            parent,
        }
    }

    pub fn root(state: &S, cloner: &dyn StateCloner<S>) -> Result<Self, CloneError> {
        Self::new(None, 0.0, state, None, cloner)
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Index of the action (in the planner's pool) that produced this node; `None` at the root.
    pub fn action(&self) -> Option<usize> {
        self.action
    }

    /// Cumulative cost from the root.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of actions between the root and this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<&Rc<PlanNode<S>>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn into_parts(self) -> (S, Option<usize>, f64, Option<Rc<PlanNode<S>>>) {
        (self.state, self.action, self.cost, self.parent)
    }

    /// Nodes from this one back to the root, nearest first.
    pub fn ancestry(&self) -> Ancestry<'_, S> {
        Ancestry { next: Some(self) }
    }
}

pub struct Ancestry<'a, S> {
    next: Option<&'a PlanNode<S>>,
}

impl<'a, S> Iterator for Ancestry<'a, S> {
    type Item = &'a PlanNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
