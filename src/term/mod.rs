//! Remote term model
//!
//! Values received from the debugged BEAM runtime, already decoded:
//! - [`value`]: the tagged [`RemoteValue`] enum and its handle types
//! - [`order`]: the canonical total order used for map keys
//! - [`render`]: the canonical textual form (`Display`)
//!
//! # Sharing
//!
//! Container payloads live behind [`std::sync::Arc`], so cloning a value (for
//! example to hand a child to a new inspector node) never copies the subtree.
//!
//! # Canonical order
//!
//! Map keys follow BEAM term order:
//!
//! ```text
//! number < atom < reference < fun < port < pid < tuple < map < list < binary
//! ```

pub mod order;
pub mod render;
pub mod value;

pub use order::compare;
pub use value::{Atom, Fun, Pid, Port, Reference, RemoteValue, TermMap};
