//! Paginated value nodes
//!
//! A [`PaginatedValueNode`] wraps one remote value for one row of the
//! variables view. Its presentation is recomputed on every request; its
//! children are produced on demand, at most one batch per call, through an
//! explicit cursor owned by the node alone.
//!
//! # States
//!
//! ```text
//! Fresh (next == 0) → PartiallyExpanded (0 < next < total) → FullyExpanded (next == total)
//! ```
//!
//! `FullyExpanded` is terminal. Collapsing a row and expanding it again uses
//! [`PaginatedValueNode::fresh`], which starts over from `Fresh`.
//!
//! # Failures
//!
//! The cursor advances after each child is appended to the sink, so when a
//! [`ChildSource`] fails mid-batch the cursor counts exactly the children the
//! host received.

use super::config::InspectorConfig;
use super::enumerator::{ChildEntry, VariantKind};
use super::errors::{InspectError, InspectResult};
use super::presenter::{self, Presentation};
use super::sink::ChildrenSink;
use super::source::{ChildSource, LocalSource};
use crate::term::RemoteValue;
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    Fresh,
    PartiallyExpanded,
    FullyExpanded,
}

/// Result of one pagination step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// This many children have not been produced yet
    MoreRemain(usize),
    Exhausted,
}

/// Pagination cursor, `0 <= next <= total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    next: usize,
    total: usize,
}

impl Cursor {
    fn remaining(&self) -> usize {
        self.total - self.next
    }

    fn outcome(&self) -> BatchOutcome {
        if self.next < self.total {
            BatchOutcome::MoreRemain(self.remaining())
        } else {
            BatchOutcome::Exhausted
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedValueNode {
    value: RemoteValue,
    kind: VariantKind,
    cursor: Cursor,
}

impl PaginatedValueNode {
    pub fn new(value: RemoteValue) -> Self {
        let kind = VariantKind::of(&value);
        let total = (kind.enumerator().child_count)(&value);
        PaginatedValueNode {
            value,
            kind,
            cursor: Cursor { next: 0, total },
        }
    }

    /// A new node over the same value with its cursor back at zero
    pub fn fresh(&self) -> Self {
        PaginatedValueNode {
            value: self.value.clone(),
            kind: self.kind,
            cursor: Cursor {
                next: 0,
                total: self.cursor.total,
            },
        }
    }

    pub fn value(&self) -> &RemoteValue {
        &self.value
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    pub fn children_count(&self) -> usize {
        self.cursor.total
    }

    pub fn next_child_index(&self) -> usize {
        self.cursor.next
    }

    /// Children not produced yet
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn has_children(&self) -> bool {
        self.cursor.total != 0
    }

    pub fn state(&self) -> PaginationState {
        match self.cursor.next {
            next if next == self.cursor.total => PaginationState::FullyExpanded,
            0 => PaginationState::Fresh,
            _ => PaginationState::PartiallyExpanded,
        }
    }

    pub fn presentation(&self, config: &InspectorConfig) -> Presentation {
        presenter::present(&self.value, config)
    }

    /// Produce the next batch using the configured batch size
    pub fn expand<K: ChildrenSink + ?Sized>(
        &mut self,
        sink: &mut K,
        config: &InspectorConfig,
    ) -> InspectResult<BatchOutcome> {
        self.compute_next_batch(sink, config.max_children_to_show())
    }

    /// Produce up to `batch_size` children from the value itself
    pub fn compute_next_batch<K: ChildrenSink + ?Sized>(
        &mut self,
        sink: &mut K,
        batch_size: usize,
    ) -> InspectResult<BatchOutcome> {
        self.compute_next_batch_from(&mut LocalSource, sink, batch_size)
    }

    /// Produce up to `batch_size` children fetched through `source`
    pub fn compute_next_batch_from<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        batch_size: usize,
    ) -> InspectResult<BatchOutcome>
    where
        S: ChildSource + ?Sized,
        K: ChildrenSink + ?Sized,
    {
        if batch_size == 0 {
            return Err(InspectError::InvalidBatchSize);
        }

        let start = self.cursor.next;
        let end = start.saturating_add(batch_size).min(self.cursor.total);
        if start == end {
            trace!("batch requested on exhausted {} node", self.value.type_name());
        }

        for index in start..end {
            debug_assert!(index < self.cursor.total);
            let ChildEntry { label, value } = match source.child_at(&self.value, index) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        "batch stopped at child {} of {}: {}",
                        index, self.cursor.total, err
                    );
                    return Err(err);
                }
            };
            sink.append(label, PaginatedValueNode::new(value));
            self.cursor.next = index + 1;
        }

        let outcome = self.cursor.outcome();
        debug!(
            "{} node produced children {}..{} of {}",
            self.value.type_name(),
            start,
            end,
            self.cursor.total
        );
        sink.batch_finished(outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::sink::ChildrenList;

    #[test]
    fn test_leaf_batch_is_a_no_op() {
        let mut node = PaginatedValueNode::new(RemoteValue::Integer(42));
        let mut sink = ChildrenList::new();

        assert!(!node.has_children());
        assert_eq!(node.state(), PaginationState::FullyExpanded);
        assert_eq!(node.compute_next_batch(&mut sink, 10), Ok(BatchOutcome::Exhausted));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_states_follow_cursor() {
        let value = RemoteValue::list((1..=5).map(RemoteValue::Integer).collect());
        let mut node = PaginatedValueNode::new(value);
        let mut sink = ChildrenList::new();
        assert_eq!(node.state(), PaginationState::Fresh);

        assert_eq!(node.compute_next_batch(&mut sink, 2), Ok(BatchOutcome::MoreRemain(3)));
        assert_eq!(node.state(), PaginationState::PartiallyExpanded);
        assert_eq!(node.next_child_index(), 2);

        assert_eq!(node.compute_next_batch(&mut sink, 10), Ok(BatchOutcome::Exhausted));
        assert_eq!(node.state(), PaginationState::FullyExpanded);
        assert_eq!(sink.labels(), vec!["[1]", "[2]", "[3]", "[4]", "[5]"]);
        assert_eq!(sink.last_outcome(), Some(BatchOutcome::Exhausted));

        let again = node.fresh();
        assert_eq!(again.state(), PaginationState::Fresh);
        assert_eq!(again.children_count(), 5);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let mut node = PaginatedValueNode::new(RemoteValue::list(vec![RemoteValue::Integer(1)]));
        let mut sink = ChildrenList::new();

        assert_eq!(
            node.compute_next_batch(&mut sink, 0),
            Err(InspectError::InvalidBatchSize)
        );
        assert_eq!(node.next_child_index(), 0);
    }

    #[test]
    fn test_children_carry_their_own_counts() {
        let inner = RemoteValue::tuple(vec![RemoteValue::atom("a"), RemoteValue::atom("b")]);
        let mut node = PaginatedValueNode::new(RemoteValue::list(vec![inner]));
        let mut sink = ChildrenList::new();

        node.compute_next_batch(&mut sink, 1).unwrap();
        let (_, child) = &sink.entries()[0];
        assert_eq!(child.children_count(), 2);
        assert_eq!(child.state(), PaginationState::Fresh);
    }
}
