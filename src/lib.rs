//! # Introduction
//!
//! beamview shows values received from a BEAM runtime (Erlang or Elixir
//! terms) as a lazily expanded tree. Nothing below the top level is
//! materialized until the user asks for it, and large containers are pulled
//! a bounded batch at a time.
//!
//! ## Pipeline
//!
//! ```text
//! Term text → Reader → RemoteValue → PaginatedValueNode → ChildrenSink → TUI
//! ```
//!
//! 1. [`term`]: the immutable [`term::RemoteValue`] model, its Erlang-style
//!    display form and the BEAM term order used for map keys.
//! 2. [`reader`]: parses bindings like `Pid = #Pid<nonode@nohost.42.0>.` from text into
//!    values.
//! 3. [`inspector`]: presentation (icon, type label, truncated display
//!    string), child enumeration per value kind, and the paginated node that
//!    hands children to a [`inspector::ChildrenSink`] in batches.
//! 4. [`ui`]: ratatui-based host; not part of the stable library API.

pub mod inspector;
pub mod reader;
pub mod term;
pub mod ui;
