//! State clone strategies.
//!
//! Every branch of the search clones its parent's state before handing it to an action's
//! effect, so no two nodes ever alias the same state value. The strategy is injected into the
//! planner; plain closures `Fn(&S) -> S` are strategies too.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloneError {
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[error("json round-trip failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state clone failed: {0}")]
    Custom(String),
}

/// Produces an owned, non-aliasing copy of a state value.
pub trait StateCloner<S> {
    fn clone_state(&self, state: &S) -> Result<S, CloneError>;
}

/// Default strategy: the state type's own [`Clone`] impl.
///
/// For plain-data types (no `Rc`, `Arc` or interior references) this is a deep copy. Types that
/// share data through handles need a tailored strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveClone;

impl<S: Clone> StateCloner<S> for DeriveClone {
    fn clone_state(&self, state: &S) -> Result<S, CloneError> {
        Ok(state.clone())
    }
}

impl<S, F> StateCloner<S> for F
where
    F: Fn(&S) -> S,
{
    fn clone_state(&self, state: &S) -> Result<S, CloneError> {
        Ok(self(state))
    }
}

/// Wraps a fallible clone function.
pub struct TryCloneWith<F>(pub F);

impl<S, F> StateCloner<S> for TryCloneWith<F>
where
    F: Fn(&S) -> Result<S, CloneError>,
{
    fn clone_state(&self, state: &S) -> Result<S, CloneError> {
        (self.0)(state)
    }
}

/// Deep copy through a JSON round-trip.
///
/// Drops anything the serde representation drops (skipped fields come back as their defaults)
/// and fails on values JSON cannot carry, such as non-finite floats read back into `f64`.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRoundTrip;

#[cfg(feature = "serde")]
impl<S> StateCloner<S> for JsonRoundTrip
where
    S: serde::Serialize + serde::de::DeserializeOwned,
{
    fn clone_state(&self, state: &S) -> Result<S, CloneError> {
        let value = serde_json::to_value(state)?;
        Ok(serde_json::from_value(value)?)
    }
}
