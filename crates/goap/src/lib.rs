//! Deterministic goal-oriented action planning over opaque, caller-defined state.
//!
//! Callers supply the domain: a pool of [`GoapAction`]s, a [`GoapGoal`] and a state type.
//! [`GoapPlanner`] supplies the search: it expands every no-repeat ordering of applicable
//! actions depth-first, collects the nodes whose incoming transition satisfies the goal, and
//! returns the cheapest one as a [`Plan`].
//!
//! ```
//! use goap::{FnAction, FnGoal, GoapAction, GoapPlanner};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Camp {
//!     axe: bool,
//!     wood: u32,
//! }
//!
//! let actions: Vec<Box<dyn GoapAction<Camp>>> = vec![
//!     Box::new(
//!         FnAction::new("getAxe", |s: &Camp| !s.axe, |mut s: Camp| {
//!             s.axe = true;
//!             s
//!         })
//!         .with_fixed_cost(2.0),
//!     ),
//!     Box::new(
//!         FnAction::new("chopWood", |s: &Camp| s.axe, |mut s: Camp| {
//!             s.wood += 1;
//!             s
//!         })
//!         .with_fixed_cost(2.0),
//!     ),
//! ];
//! let goal = FnGoal::new("collectWood", |prev: &Camp, next: &Camp| next.wood > prev.wood);
//! let planner = GoapPlanner::new(actions, Box::new(goal));
//!
//! let plan = planner
//!     .create_plan(&Camp { axe: false, wood: 0 })
//!     .expect("clone never fails")
//!     .expect("plan");
//! assert_eq!(plan.labels(), ["getAxe", "chopWood"]);
//! assert_eq!(plan.total_cost, 4.0);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod clone;
pub mod config;
pub mod error;
pub mod node;
pub mod plan;
pub mod planner;
pub mod trace;

pub use action::{FnAction, FnGoal, GoapAction, GoapGoal};
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use clone::JsonRoundTrip;
pub use clone::{CloneError, DeriveClone, StateCloner, TryCloneWith};
pub use config::PlannerConfig;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use error::ConfigError;
pub use error::PlanError;
pub use node::PlanNode;
pub use plan::{Plan, PlanStep};
pub use planner::{GoapPlanner, PlanStats};
pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
