#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanStep<S> {
    pub label: String,
    /// Cumulative cost up to and including this step.
    pub cost: f64,
    /// Snapshot of the state after this step.
    pub state: S,
}

/// The cheapest action sequence found for a goal.
///
/// With the `serde` feature this serializes as `{ totalCost, goal, actions: [{ label, cost,
/// state }] }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Plan<S> {
    pub total_cost: f64,
    /// Label of the goal this plan satisfies.
    pub goal: String,
    pub actions: Vec<PlanStep<S>>,
}

impl<S> Plan<S> {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.actions.iter().map(|step| step.label.as_str()).collect()
    }

    /// State after the last step.
    pub fn final_state(&self) -> Option<&S> {
        self.actions.last().map(|step| &step.state)
    }

    pub fn steps(&self) -> impl Iterator<Item = &PlanStep<S>> {
        self.actions.iter()
    }
}
