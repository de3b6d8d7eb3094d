//! Inspector configuration
//!
//! The two knobs the host may tune: how many children one expansion step
//! materializes, and how long an inline display string may get before it is
//! cut and an ellipsis appended. Defaults come from [`super::constants`].

use super::constants::{ELLIPSIS, MAX_CHILDREN_TO_SHOW, MAX_VALUE_LENGTH};
use super::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorConfig {
    max_children_to_show: usize,
    max_value_length: usize,
}

impl InspectorConfig {
    /// Validated configuration.
    ///
    /// `max_value_length` must leave room for at least one character before
    /// the ellipsis.
    pub fn new(max_children_to_show: usize, max_value_length: usize) -> Result<Self, ConfigError> {
        if max_children_to_show == 0 {
            return Err(ConfigError::BatchSize(max_children_to_show));
        }
        let min = ELLIPSIS.len() + 1;
        if max_value_length < min {
            return Err(ConfigError::ValueLength {
                min,
                got: max_value_length,
            });
        }
        Ok(InspectorConfig {
            max_children_to_show,
            max_value_length,
        })
    }

    pub fn max_children_to_show(&self) -> usize {
        self.max_children_to_show
    }

    pub fn max_value_length(&self) -> usize {
        self.max_value_length
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        InspectorConfig {
            max_children_to_show: MAX_CHILDREN_TO_SHOW,
            max_value_length: MAX_VALUE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert_eq!(config.max_children_to_show(), 100);
        assert_eq!(config.max_value_length(), 1000);
    }

    #[test]
    fn test_rejects_unusable_values() {
        assert_eq!(InspectorConfig::new(0, 100), Err(ConfigError::BatchSize(0)));
        assert_eq!(
            InspectorConfig::new(10, 3),
            Err(ConfigError::ValueLength { min: 4, got: 3 })
        );
        assert!(InspectorConfig::new(1, 4).is_ok());
    }
}
