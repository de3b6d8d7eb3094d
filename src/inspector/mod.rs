//! Lazy, paginated inspection of remote values
//!
//! This module turns an already-received [`RemoteValue`] into rows a
//! variables view can draw:
//! - [`presenter`]: icon, type label and truncated display string
//! - [`enumerator`]: per-kind child counting and child access
//! - [`source`]: the seam through which children are fetched
//! - [`node`]: the pagination state machine the host drives
//! - [`sink`]: where a batch of children is delivered
//! - [`config`] / [`constants`]: batch size and truncation length
//!
//! # Host contract
//!
//! The host calls [`PaginatedValueNode::presentation`] whenever it paints a
//! row, and [`PaginatedValueNode::compute_next_batch`] only when the user
//! expands the row or asks for more after a batch reported
//! [`BatchOutcome::MoreRemain`].
//!
//! [`RemoteValue`]: crate::term::RemoteValue

pub mod config;
pub mod constants;
pub mod enumerator;
pub mod errors;
pub mod node;
pub mod presenter;
pub mod sink;
pub mod source;

pub use config::InspectorConfig;
pub use enumerator::{ChildEntry, VariantKind};
pub use errors::{ConfigError, InspectError, InspectResult};
pub use node::{BatchOutcome, PaginatedValueNode, PaginationState};
pub use presenter::{present, Icon, Presentation};
pub use sink::{ChildrenList, ChildrenSink};
pub use source::{ChildSource, LocalSource};
