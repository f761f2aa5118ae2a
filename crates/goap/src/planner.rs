use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::action::{GoapAction, GoapGoal};
use crate::clone::{DeriveClone, StateCloner};
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::node::PlanNode;
use crate::plan::{Plan, PlanStep};
use crate::trace::{self, NullTraceSink, TraceSink, Tracer};

/// Counters gathered during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Child nodes built (one per applicable action per visited node).
    pub expansions: usize,
    /// Nodes whose incoming transition satisfied the goal.
    pub leaves: usize,
    /// Visited nodes where no remaining action was applicable.
    pub dead_ends: usize,
    /// Depth of the deepest node built.
    pub max_depth: usize,
}

/// Exhaustive, depth-first GOAP planner.
///
/// - Every ordering of a subset of the pool is a candidate path; an action label is used at most
///   once per path, but stays available to sibling branches.
/// - A path ends at the first transition that satisfies the goal. All such leaves across the
///   whole tree are collected before the cheapest one is chosen.
/// - Equal-cost leaves are ranked by discovery order: the first one reached wins.
/// - No visited set: equal states reached along different paths are expanded separately, so
///   work grows with the number of action permutations. Keep pools small.
pub struct GoapPlanner<S> {
    actions: Vec<Box<dyn GoapAction<S>>>,
    goal: Box<dyn GoapGoal<S>>,
    cloner: Box<dyn StateCloner<S>>,
    config: PlannerConfig,
}

impl<S> GoapPlanner<S>
where
    S: Clone + 'static,
{
    /// Planner that clones states with `S::clone`.
    pub fn new(actions: Vec<Box<dyn GoapAction<S>>>, goal: Box<dyn GoapGoal<S>>) -> Self {
        Self::with_state_cloner(actions, goal, DeriveClone)
    }
}

impl<S> GoapPlanner<S> {
    pub fn with_state_cloner(
        actions: Vec<Box<dyn GoapAction<S>>>,
        goal: Box<dyn GoapGoal<S>>,
        cloner: impl StateCloner<S> + 'static,
    ) -> Self {
        Self {
            actions,
            goal,
            cloner: Box::new(cloner),
            config: PlannerConfig::default(),
        }
    }

    pub fn with_cloner(mut self, cloner: impl StateCloner<S> + 'static) -> Self {
        self.cloner = Box::new(cloner);
        self
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn actions(&self) -> &[Box<dyn GoapAction<S>>] {
        &self.actions
    }

    pub fn goal(&self) -> &dyn GoapGoal<S> {
        &*self.goal
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Searches for the cheapest action sequence whose final transition satisfies the goal.
    ///
    /// Returns `Ok(None)` when no ordering of the pool reaches the goal, including when the pool
    /// is empty. A goal that already "holds" for `initial` still needs one qualifying
    /// transition; an empty plan is never returned.
    pub fn create_plan(&self, initial: &S) -> Result<Option<Plan<S>>> {
        let mut sink = NullTraceSink;
        self.search(initial, &mut sink).map(|(plan, _)| plan)
    }

    /// Like [`GoapPlanner::create_plan`], streaming search events into `sink`.
    pub fn create_plan_traced(
        &self,
        initial: &S,
        sink: &mut dyn TraceSink,
    ) -> Result<Option<Plan<S>>> {
        self.search(initial, sink).map(|(plan, _)| plan)
    }

    /// Like [`GoapPlanner::create_plan`], also returning search counters.
    pub fn create_plan_with_stats(&self, initial: &S) -> Result<(Option<Plan<S>>, PlanStats)> {
        let mut sink = NullTraceSink;
        self.search(initial, &mut sink)
    }

    fn search(&self, initial: &S, sink: &mut dyn TraceSink) -> Result<(Option<Plan<S>>, PlanStats)> {
        let mut tracer = Tracer::new(sink);
        let goal = self.goal.label();
        debug!(goal, actions = self.actions.len(), "planning started");
        tracer.emit(trace::PLAN_START, Some(goal), 0, 0.0);

        let root = Rc::new(PlanNode::root(initial, &*self.cloner)?);
        let mut stats = PlanStats::default();
        let leaves = self.build_action_graph(root, &mut stats, &mut tracer)?;
        let plan = self.extract_best_plan(leaves)?;

        match &plan {
            Some(plan) => {
                debug!(
                    goal,
                    total_cost = plan.total_cost,
                    steps = plan.len(),
                    leaves = stats.leaves,
                    expansions = stats.expansions,
                    "plan found"
                );
                tracer.emit(trace::PLAN_RESULT, Some(goal), plan.len(), plan.total_cost);
            }
            None => {
                debug!(goal, expansions = stats.expansions, "no plan found");
                tracer.emit(trace::PLAN_NONE, Some(goal), 0, 0.0);
            }
        }

        Ok((plan, stats))
    }

    /// Depth-first expansion on an explicit stack.
    ///
    /// Each frame walks its pool in order and pushes a child frame as soon as a non-satisfying
    /// child is built, so nodes are visited in the same order as a recursive walk would.
    fn build_action_graph(
        &self,
        root: Rc<PlanNode<S>>,
        stats: &mut PlanStats,
        tracer: &mut Tracer<'_>,
    ) -> Result<BinaryHeap<Leaf<S>>> {
        let mut leaves = BinaryHeap::new();
        let mut stack = vec![Frame::new(root, (0..self.actions.len()).collect())];

        while let Some(frame) = stack.last_mut() {
            let Some(&index) = frame.pool.get(frame.cursor) else {
                if frame.children == 0 {
                    let node = &frame.node;
                    stats.dead_ends += 1;
                    trace!(depth = node.depth(), cost = node.cost(), "dead end");
                    tracer.emit(
                        trace::DEAD_END,
                        node.action().map(|i| self.actions[i].label()),
                        node.depth(),
                        node.cost(),
                    );
                }
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let action = &self.actions[index];
            if !action.condition(frame.node.state()) {
                continue;
            }
            frame.children += 1;

            stats.expansions += 1;
            if let Some(limit) = self.config.max_expansions {
                if stats.expansions > limit {
                    debug!(limit, "expansion budget exhausted");
                    return Err(PlanError::ExpansionBudgetExhausted { limit });
                }
            }

            let parent = Rc::clone(&frame.node);
            let next_state = action.effect(self.cloner.clone_state(parent.state())?);
            let cost = parent.cost() + action.cost(parent.state(), &next_state);
            let child = Rc::new(PlanNode::from_owned(
                Some(Rc::clone(&parent)),
                cost,
                next_state,
                Some(index),
            ));
            stats.max_depth = stats.max_depth.max(child.depth());

            if self.goal.validate(parent.state(), child.state()) {
                trace!(action = action.label(), depth = child.depth(), cost, "goal satisfied");
                tracer.emit(trace::LEAF, Some(action.label()), child.depth(), cost);
                leaves.push(Leaf {
                    node: child,
                    seq: stats.leaves,
                });
                stats.leaves += 1;
                continue;
            }

            tracer.emit(trace::NODE_EXPAND, Some(action.label()), child.depth(), cost);
            let label = action.label();
            let remaining: Vec<usize> = frame
                .pool
                .iter()
                .copied()
                .filter(|&i| self.actions[i].label() != label)
                .collect();
            stack.push(Frame::new(child, remaining));
        }

        Ok(leaves)
    }

    fn extract_best_plan(&self, mut leaves: BinaryHeap<Leaf<S>>) -> Result<Option<Plan<S>>> {
        let Some(best) = leaves.pop() else {
            return Ok(None);
        };
        // The winning path is uniquely owned once the other candidates are gone.
        drop(leaves);

        let total_cost = best.node.cost();
        let mut actions = Vec::with_capacity(best.node.depth());
        let mut cursor = Some(best.node);

        while let Some(shared) = cursor {
            let node = match Rc::try_unwrap(shared) {
                Ok(node) => node,
                Err(shared) => {
                    if shared.is_root() {
                        break;
                    }
                    PlanNode::from_owned(
                        shared.parent().cloned(),
                        shared.cost(),
                        self.cloner.clone_state(shared.state())?,
                        shared.action(),
                    )
                }
            };
            let (state, action, cost, parent) = node.into_parts();
            if let Some(index) = action {
                actions.push(PlanStep {
                    label: self.actions[index].label().to_string(),
                    cost,
                    state,
                });
            }
            cursor = parent;
        }
        actions.reverse();

        Ok(Some(Plan {
            total_cost,
            goal: self.goal.label().to_string(),
            actions,
        }))
    }
}

impl<S> fmt::Debug for GoapPlanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoapPlanner")
            .field(
                "actions",
                &self.actions.iter().map(|a| a.label()).collect::<Vec<_>>(),
            )
            .field("goal", &self.goal.label())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

struct Frame<S> {
    node: Rc<PlanNode<S>>,
    pool: Vec<usize>,
    cursor: usize,
    children: usize,
}

impl<S> Frame<S> {
    fn new(node: Rc<PlanNode<S>>, pool: Vec<usize>) -> Self {
        Self {
            node,
            pool,
            cursor: 0,
            children: 0,
        }
    }
}

struct Leaf<S> {
    node: Rc<PlanNode<S>>,
    seq: usize,
}

impl<S> Ord for Leaf<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other
            .node
            .cost()
            .total_cmp(&self.node.cost())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Leaf<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for Leaf<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Leaf<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{FnAction, FnGoal};

    fn counter_planner(costs: &[f64]) -> GoapPlanner<u32> {
        let actions = costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| {
                Box::new(
                    FnAction::new(format!("step{i}"), |_: &u32| true, |s: u32| s + 1)
                        .with_fixed_cost(cost),
                ) as Box<dyn GoapAction<u32>>
            })
            .collect();
        GoapPlanner::new(
            actions,
            Box::new(FnGoal::new("reach2", |_: &u32, next: &u32| *next >= 2)),
        )
    }

    #[test]
    fn leaf_heap_pops_cheapest_then_earliest() {
        let root = Rc::new(PlanNode::root(&0u32, &DeriveClone).unwrap());
        let leaf = |cost: f64, seq: usize| Leaf {
            node: Rc::new(PlanNode::from_owned(Some(Rc::clone(&root)), cost, 1, Some(0))),
            seq,
        };

        let mut heap = BinaryHeap::new();
        heap.push(leaf(3.0, 0));
        heap.push(leaf(1.0, 2));
        heap.push(leaf(1.0, 1));
        heap.push(leaf(2.0, 3));

        let order: Vec<(f64, usize)> = std::iter::from_fn(|| heap.pop())
            .map(|l| (l.node.cost(), l.seq))
            .collect();
        assert_eq!(order, vec![(1.0, 1), (1.0, 2), (2.0, 3), (3.0, 0)]);
    }

    #[test]
    fn stats_count_every_ordering() {
        // Three unconditional actions, goal after two steps: 3 * 2 = 6 leaves, 3 inner nodes.
        let planner = counter_planner(&[1.0, 1.0, 1.0]);
        let (plan, stats) = planner.create_plan_with_stats(&0).unwrap();

        let plan = plan.unwrap();
        assert_eq!(plan.labels(), ["step0", "step1"]);
        assert_eq!(stats.leaves, 6);
        assert_eq!(stats.expansions, 9);
        assert_eq!(stats.dead_ends, 0);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let planner =
            counter_planner(&[1.0, 1.0, 1.0]).with_config(PlannerConfig::default().with_max_expansions(4));
        let err = planner.create_plan(&0).unwrap_err();
        assert!(matches!(err, PlanError::ExpansionBudgetExhausted { limit: 4 }));
    }

    #[test]
    fn budget_large_enough_changes_nothing() {
        let planner =
            counter_planner(&[3.0, 1.0, 2.0]).with_config(PlannerConfig::default().with_max_expansions(9));
        let plan = planner.create_plan(&0).unwrap().unwrap();
        assert_eq!(plan.labels(), ["step1", "step2"]);
        assert_eq!(plan.total_cost, 3.0);
    }

    #[test]
    fn debug_lists_labels() {
        let planner = counter_planner(&[1.0]);
        let rendered = format!("{planner:?}");
        assert!(rendered.contains("step0"));
        assert!(rendered.contains("reach2"));
    }
}
