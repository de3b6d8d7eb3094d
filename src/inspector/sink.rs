//! Children sinks
//!
//! The host hands a [`ChildrenSink`] to each pagination call. The node appends
//! `(label, child node)` pairs in enumeration order and, once the batch ends,
//! tells the sink whether more children remain.

use super::node::{BatchOutcome, PaginatedValueNode};

pub trait ChildrenSink {
    fn append(&mut self, label: String, child: PaginatedValueNode);

    /// Called once per successful batch, after the last append
    fn batch_finished(&mut self, _outcome: BatchOutcome) {}
}

/// Vec-backed sink that keeps every appended child
#[derive(Debug, Default)]
pub struct ChildrenList {
    entries: Vec<(String, PaginatedValueNode)>,
    last_outcome: Option<BatchOutcome>,
}

impl ChildrenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, PaginatedValueNode)] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Outcome reported by the most recent finished batch
    pub fn last_outcome(&self) -> Option<BatchOutcome> {
        self.last_outcome
    }

    pub fn into_entries(self) -> Vec<(String, PaginatedValueNode)> {
        self.entries
    }
}

impl ChildrenSink for ChildrenList {
    fn append(&mut self, label: String, child: PaginatedValueNode) {
        self.entries.push((label, child));
    }

    fn batch_finished(&mut self, outcome: BatchOutcome) {
        self.last_outcome = Some(outcome);
    }
}
