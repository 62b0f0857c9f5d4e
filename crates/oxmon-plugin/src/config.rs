use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Output settings of a plugin, usually read from a small TOML file.
///
/// ```toml
/// message_separator = " / "
/// all_metrics_in_output = true
/// preamble = "Checks local host resources"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginConfig {
    #[serde(default = "default_message_separator")]
    pub message_separator: String,
    /// Report every metric in the message text, not only breaches.
    #[serde(default)]
    pub all_metrics_in_output: bool,
    pub preamble: Option<String>,
    pub description: Option<String>,
}

fn default_message_separator() -> String {
    ", ".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            message_separator: default_message_separator(),
            all_metrics_in_output: false,
            preamble: None,
            description: None,
        }
    }
}

impl PluginConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
