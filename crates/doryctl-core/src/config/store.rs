//! Config store for loading and saving config.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{DoryConfig, parser, paths::default_config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the default location (`$DORYCTL_CONFIG` or the user config dir).
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::from_path(default_config_path(None)?))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<DoryConfig> {
        if !self.config_path.exists() {
            return Ok(DoryConfig::new());
        }
        if self.config_path.is_dir() {
            anyhow::bail!(
                "Config path must be a file: {}",
                self.config_path.display()
            );
        }
        parser::parse_config_toml(&self.config_path)
    }

    pub fn save(&self, config: &DoryConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        restrict_permissions(&self.config_path)?;
        Ok(())
    }
}

/// The file holds an access token; keep it owner-only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
