//! Caller-implemented capability contracts: actions and goals.

/// An action the planner may chain into a plan.
///
/// Labels must be unique within one planner's pool: a label that has been used on a path is
/// removed from the pool for every deeper node on that path.
pub trait GoapAction<S> {
    fn label(&self) -> &str;

    /// Whether the action can be applied to `state`.
    fn condition(&self, state: &S) -> bool;

    /// Transforms an already-cloned state. The value is owned by this call; mutate and return it.
    fn effect(&self, state: S) -> S;

    /// Non-negative cost of the transition `prev -> next`.
    fn cost(&self, prev: &S, next: &S) -> f64;
}

/// The predicate a plan must satisfy.
///
/// Goals are validated against a single transition, never against the initial state alone, so
/// a plan always contains at least one action.
pub trait GoapGoal<S> {
    fn label(&self) -> &str;

    fn validate(&self, prev: &S, next: &S) -> bool;
}

impl<S, A> GoapAction<S> for Box<A>
where
    A: GoapAction<S> + ?Sized,
{
    fn label(&self) -> &str {
        (**self).label()
    }

    fn condition(&self, state: &S) -> bool {
        (**self).condition(state)
    }

    fn effect(&self, state: S) -> S {
        (**self).effect(state)
    }

    fn cost(&self, prev: &S, next: &S) -> f64 {
        (**self).cost(prev, next)
    }
}

impl<S, G> GoapGoal<S> for Box<G>
where
    G: GoapGoal<S> + ?Sized,
{
    fn label(&self) -> &str {
        (**self).label()
    }

    fn validate(&self, prev: &S, next: &S) -> bool {
        (**self).validate(prev, next)
    }
}

type ConditionFn<S> = Box<dyn Fn(&S) -> bool>;
type EffectFn<S> = Box<dyn Fn(S) -> S>;
type CostFn<S> = Box<dyn Fn(&S, &S) -> f64>;

/// A [`GoapAction`] assembled from closures.
///
/// The cost defaults to `1.0` per step; use [`FnAction::with_fixed_cost`] or
/// [`FnAction::with_cost`] for anything else.
pub struct FnAction<S> {
    label: String,
    condition: ConditionFn<S>,
    effect: EffectFn<S>,
    cost: CostFn<S>,
}

impl<S> FnAction<S> {
    pub fn new(
        label: impl Into<String>,
        condition: impl Fn(&S) -> bool + 'static,
        effect: impl Fn(S) -> S + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            condition: Box::new(condition),
            effect: Box::new(effect),
            cost: Box::new(|_, _| 1.0),
        }
    }

    pub fn with_fixed_cost(mut self, cost: f64) -> Self {
        self.cost = Box::new(move |_, _| cost);
        self
    }

    /// State-dependent cost computed from both endpoints of the transition.
    pub fn with_cost(mut self, cost: impl Fn(&S, &S) -> f64 + 'static) -> Self {
        self.cost = Box::new(cost);
        self
    }
}

impl<S> std::fmt::Debug for FnAction<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<S> GoapAction<S> for FnAction<S> {
    fn label(&self) -> &str {
        &self.label
    }

    fn condition(&self, state: &S) -> bool {
        (self.condition)(state)
    }

    fn effect(&self, state: S) -> S {
        (self.effect)(state)
    }

    fn cost(&self, prev: &S, next: &S) -> f64 {
        (self.cost)(prev, next)
    }
}

/// A [`GoapGoal`] backed by a transition predicate.
pub struct FnGoal<S> {
    label: String,
    validate: Box<dyn Fn(&S, &S) -> bool>,
}

impl<S> FnGoal<S> {
    pub fn new(label: impl Into<String>, validate: impl Fn(&S, &S) -> bool + 'static) -> Self {
        Self {
            label: label.into(),
            validate: Box::new(validate),
        }
    }
}

impl<S> std::fmt::Debug for FnGoal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnGoal")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<S> GoapGoal<S> for FnGoal<S> {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self, prev: &S, next: &S) -> bool {
        (self.validate)(prev, next)
    }
}
