//! Recorder configuration.

use serde::{Deserialize, Serialize};

/// Label used when none is given
pub const DEFAULT_LABEL: &str = "tick_recorder";

/// Recorder configuration
///
/// There is no sampling interval: a recorder always captures once per
/// scheduler turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Name attached to every log event the recorder emits
    pub label: String,
}

impl RecorderConfig {
    /// Create a config with the default label
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RecorderConfig::default();
        assert_eq!(config.label, DEFAULT_LABEL);
    }

    #[test]
    fn test_config_with_label() {
        let config = RecorderConfig::new().with_label("session");
        assert_eq!(config.label, "session");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: RecorderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RecorderConfig::default());
    }
}
