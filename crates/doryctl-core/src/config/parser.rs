//! Config file parsing

use super::schema::DoryConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse config.toml from disk
pub fn parse_config_toml(path: &Path) -> Result<DoryConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse config.toml content from string
pub fn parse_config_toml_str(content: &str) -> Result<DoryConfig> {
    // toml's message already carries the line, column and offending snippet.
    let config: DoryConfig =
        toml::from_str(content).map_err(|e| anyhow::anyhow!("TOML parsing error: {e}"))?;

    config.validate()?;

    Ok(config)
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &DoryConfig) -> Result<String> {
    toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration to TOML")
}
