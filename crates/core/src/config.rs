use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, Value};

/// Top-level configuration for inspecting projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub block: BlockConfig,
    /// Destination pre-seed used when projecting for display. An absent
    /// optional reads back as this value.
    pub seed: Value,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// How projected values are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Processing block used to size linear sample-accurate histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub size: usize,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self { size: 64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.output.pretty);
        assert_eq!(config.block.size, 64);
        assert_eq!(config.seed, Value::Impulse);
    }

    #[test]
    fn reads_nested_sections() {
        let config = AppConfig::from_json_str(
            r#"{ "block": { "size": 16 }, "seed": { "type": "string", "value": "unset" } }"#,
        )
        .unwrap();
        assert_eq!(config.block.size, 16);
        assert!(config.output.pretty);
        assert_eq!(config.seed, Value::String("unset".into()));
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(AppConfig::from_json_str("{ block: 3 }").is_err());
        assert!(AppConfig::load("/nonexistent/portvalue.json").is_err());
    }
}
