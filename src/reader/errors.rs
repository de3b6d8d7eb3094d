//! Reader error type and source locations

use thiserror::Error;

/// Position in the literal text (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        SourceLocation { line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("read error at line {}, column {}: {}", .location.line, .location.column, .message)]
pub struct ReadError {
    pub message: String,
    pub location: SourceLocation,
}

impl ReadError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        ReadError {
            message: message.into(),
            location,
        }
    }
}
