//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`variables`]: The lazily expanded variables tree with "more" placeholders
//! - [`detail`]: Presentation of the selected row, including the full value
//! - [`status`]: Status bar with keybindings and the last action's outcome
//!
//! Each pane module exports a primary `render_*` function plus the state and
//! data types it needs.

pub mod detail;
pub mod status;
pub mod variables;

// Re-export render functions for convenience
pub use detail::render_detail_pane;
pub use status::render_status_bar;
pub use variables::{render_variables_pane, VariablesRenderData, VariablesScrollState};
