//! Structured planning trace.
//!
//! A search can stream events into a [`TraceSink`] so tools and tests can replay how the
//! action graph was explored. Events are plain data; render them however you like.

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PLAN_START: &str = "goap.plan.start";
pub const NODE_EXPAND: &str = "goap.node.expand";
pub const LEAF: &str = "goap.leaf";
pub const DEAD_END: &str = "goap.dead_end";
pub const PLAN_RESULT: &str = "goap.plan.result";
pub const PLAN_NONE: &str = "goap.plan.none";

/// A single trace record.
///
/// `label` names the action for node events and the goal for plan events. `depth` is the node
/// depth (plan length for `goap.plan.result`), `cost` the cumulative cost at that point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub seq: u64,
    pub tag: Cow<'static, str>,
    pub label: Option<String>,
    pub depth: usize,
    pub cost: f64,
}

impl TraceEvent {
    pub fn new(seq: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            seq,
            tag: tag.into(),
            label: None,
            depth: 0,
            cost: 0.0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);

    /// Sinks that discard everything return `false` so callers can skip building events.
    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl VecTraceSink {
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Serializable collection of events, e.g. for dumping a search to disk.
#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Numbers events in emission order.
pub(crate) struct Tracer<'a> {
    sink: &'a mut dyn TraceSink,
    seq: u64,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink, seq: 0 }
    }

    pub(crate) fn emit(&mut self, tag: &'static str, label: Option<&str>, depth: usize, cost: f64) {
        if !self.sink.enabled() {
            return;
        }
        let mut event = TraceEvent::new(self.seq, tag)
            .with_depth(depth)
            .with_cost(cost);
        if let Some(label) = label {
            event = event.with_label(label);
        }
        self.seq += 1;
        self.sink.emit(event);
    }
}
