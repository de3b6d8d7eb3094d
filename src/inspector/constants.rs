// Configuration constants for the variables inspector

/// Maximum number of child rows materialized by one expansion step
pub const MAX_CHILDREN_TO_SHOW: usize = 100;

/// Maximum inline length (in characters) of a display string before it is truncated
pub const MAX_VALUE_LENGTH: usize = 1000;

/// Marker appended to a truncated display string
pub const ELLIPSIS: &str = "...";
