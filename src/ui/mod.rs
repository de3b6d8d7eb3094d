//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`tree`]**: the host's view model, rows owning their paginated nodes
//! - **[`app`]**: application state and the keyboard event loop
//! - **[`panes`]**: stateless render functions for the variables tree, the
//!   detail view and the status bar
//! - **[`theme`]**: centralized color palette and icon glyphs
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`VariablesTree`] and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;
pub mod tree;

pub use app::App;
pub use tree::{RowKind, TreeRow, VariablesTree, VisibleRow};
