//! Error types for the inspector
//!
//! [`InspectError`] covers everything a pagination call can report to the host.
//! [`ConfigError`] is returned when an [`InspectorConfig`] is built with values
//! the pagination and truncation rules cannot work with.
//!
//! [`InspectorConfig`]: super::config::InspectorConfig

use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    /// A child index outside `[0, count)` was requested.
    ///
    /// The node never issues such a request; seeing this means an enumerator or
    /// child source broke its contract.
    #[error("child index {index} out of range for {count} children")]
    OutOfRange { index: usize, count: usize },

    /// The round trip that fetches a child from the remote runtime failed
    #[error("transport failure while fetching child {index}: {message}")]
    Transport { index: usize, message: String },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

impl InspectError {
    pub fn transport(index: usize, message: impl Into<String>) -> Self {
        InspectError::Transport {
            index,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max children to show must be at least 1, got {0}")]
    BatchSize(usize),

    #[error("max value length must be at least {min}, got {got}")]
    ValueLength { min: usize, got: usize },
}
