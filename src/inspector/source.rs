//! Child sources
//!
//! The node fetches each child through a [`ChildSource`]. For a value that
//! arrived whole, [`LocalSource`] answers from the enumerator table. A source
//! backed by the debugger's transport may need a round trip per child; it
//! reports failures as [`InspectError::Transport`] and is awaited on the
//! caller's thread.
//!
//! [`InspectError::Transport`]: super::errors::InspectError::Transport

use super::enumerator::{self, ChildEntry};
use super::errors::InspectResult;
use crate::term::RemoteValue;

pub trait ChildSource {
    /// Fetch the child of `value` at `index`.
    ///
    /// Only called with `index < child_count(value)`.
    fn child_at(&mut self, value: &RemoteValue, index: usize) -> InspectResult<ChildEntry>;
}

/// Source for values whose children are already known locally
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl ChildSource for LocalSource {
    fn child_at(&mut self, value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
        enumerator::child_at(value, index)
    }
}

impl<S: ChildSource + ?Sized> ChildSource for &mut S {
    fn child_at(&mut self, value: &RemoteValue, index: usize) -> InspectResult<ChildEntry> {
        (**self).child_at(value, index)
    }
}
