//! Randomized checks of the planner against a brute-force enumeration of every no-repeat
//! action ordering.

use goap::{GoapAction, GoapGoal, GoapPlanner, Plan};
use proptest::prelude::*;

type Bits = u8;

const STATE_MASK: Bits = 0b0011_1111;

#[derive(Debug, Clone)]
struct BitAction {
    label: String,
    pre: Bits,
    add: Bits,
    remove: Bits,
    cost: u8,
}

impl BitAction {
    fn applicable(&self, state: Bits) -> bool {
        state & self.pre == self.pre
    }

    fn apply(&self, state: Bits) -> Bits {
        (state | self.add) & !self.remove & STATE_MASK
    }
}

impl GoapAction<Bits> for BitAction {
    fn label(&self) -> &str {
        &self.label
    }

    fn condition(&self, state: &Bits) -> bool {
        self.applicable(*state)
    }

    fn effect(&self, state: Bits) -> Bits {
        self.apply(state)
    }

    fn cost(&self, _prev: &Bits, _next: &Bits) -> f64 {
        f64::from(self.cost)
    }
}

#[derive(Debug, Clone, Copy)]
struct AllSet(Bits);

impl AllSet {
    fn holds(&self, next: Bits) -> bool {
        next & self.0 == self.0
    }
}

impl GoapGoal<Bits> for AllSet {
    fn label(&self) -> &str {
        "allSet"
    }

    fn validate(&self, _prev: &Bits, next: &Bits) -> bool {
        self.holds(*next)
    }
}

fn planner(actions: &[BitAction], goal: AllSet) -> GoapPlanner<Bits> {
    let pool: Vec<Box<dyn GoapAction<Bits>>> = actions
        .iter()
        .cloned()
        .map(|a| Box::new(a) as Box<dyn GoapAction<Bits>>)
        .collect();
    GoapPlanner::new(pool, Box::new(goal))
}

/// Cheapest cost over every sequence of distinct actions whose final transition satisfies the
/// goal, or `None` if there is no such sequence.
fn brute_force_min(actions: &[BitAction], goal: AllSet, start: Bits) -> Option<f64> {
    fn walk(
        actions: &[BitAction],
        goal: AllSet,
        state: Bits,
        cost: f64,
        used: &mut Vec<bool>,
        best: &mut Option<f64>,
    ) {
        for (i, action) in actions.iter().enumerate() {
            if used[i] || !action.applicable(state) {
                continue;
            }
            let next = action.apply(state);
            let next_cost = cost + f64::from(action.cost);
            if goal.holds(next) && best.map_or(true, |b| next_cost < b) {
                *best = Some(next_cost);
            }
            used[i] = true;
            walk(actions, goal, next, next_cost, used, best);
            used[i] = false;
        }
    }

    let mut best = None;
    let mut used = vec![false; actions.len()];
    walk(actions, goal, start, 0.0, &mut used, &mut best);
    best
}

fn replay(plan: &Plan<Bits>, actions: &[BitAction], goal: AllSet, start: Bits) {
    let mut state = start;
    for (i, step) in plan.actions.iter().enumerate() {
        let action = actions
            .iter()
            .find(|a| a.label == step.label)
            .expect("plan step names a pool action");
        assert!(action.applicable(state), "step {i} applied out of condition");
        let next = action.apply(state);
        assert_eq!(next, step.state, "snapshot of step {i} differs");

        if i + 1 == plan.actions.len() {
            assert!(goal.holds(next), "final transition misses the goal");
        } else {
            assert!(!goal.holds(next), "path continued past a satisfying transition");
        }
        state = next;
    }
}

fn action_strategy(index: usize) -> impl Strategy<Value = BitAction> {
    (any::<Bits>(), any::<Bits>(), any::<Bits>(), any::<Bits>(), 0u8..10).prop_map(
        move |(pre_a, pre_b, add, remove, cost)| BitAction {
            label: format!("a{index}"),
            pre: pre_a & pre_b & STATE_MASK,
            add: add & STATE_MASK,
            remove: remove & remove.rotate_left(3) & STATE_MASK,
            cost,
        },
    )
}

fn pool_strategy() -> impl Strategy<Value = Vec<BitAction>> {
    (0usize..=5).prop_flat_map(|len| (0..len).map(action_strategy).collect::<Vec<_>>())
}

fn goal_strategy() -> impl Strategy<Value = AllSet> {
    (0u32..6, 0u32..6).prop_map(|(a, b)| AllSet((1 << a) | (1 << b)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn matches_brute_force(
        actions in pool_strategy(),
        goal in goal_strategy(),
        start in any::<Bits>().prop_map(|s| s & STATE_MASK),
    ) {
        let planner = planner(&actions, goal);
        let plan = planner.create_plan(&start).unwrap();
        let expected = brute_force_min(&actions, goal, start);

        match (&plan, expected) {
            (None, None) => {}
            (Some(plan), Some(min)) => {
                prop_assert_eq!(plan.total_cost, min);
            }
            (plan, expected) => {
                prop_assert!(false, "planner {:?} vs brute force {:?}", plan, expected);
            }
        }
    }

    #[test]
    fn plans_are_well_formed(
        actions in pool_strategy(),
        goal in goal_strategy(),
        start in any::<Bits>().prop_map(|s| s & STATE_MASK),
    ) {
        let planner = planner(&actions, goal);
        let Some(plan) = planner.create_plan(&start).unwrap() else {
            return Ok(());
        };

        prop_assert!(!plan.is_empty());
        prop_assert!(plan.len() <= actions.len());
        prop_assert_eq!(plan.goal.as_str(), "allSet");

        let mut labels = plan.labels();
        labels.sort_unstable();
        labels.dedup();
        prop_assert_eq!(labels.len(), plan.len());

        for pair in plan.actions.windows(2) {
            prop_assert!(pair[0].cost <= pair[1].cost);
        }
        prop_assert_eq!(plan.actions.last().map(|s| s.cost), Some(plan.total_cost));

        replay(&plan, &actions, goal, start);
    }

    #[test]
    fn repeated_searches_agree(
        actions in pool_strategy(),
        goal in goal_strategy(),
        start in any::<Bits>().prop_map(|s| s & STATE_MASK),
    ) {
        let planner = planner(&actions, goal);
        let first = planner.create_plan_with_stats(&start).unwrap();
        let second = planner.create_plan_with_stats(&start).unwrap();
        prop_assert_eq!(first, second);
    }
}
