//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "DORYCTL_CONFIG";

pub const CONFIG_DIR_NAME: &str = "doryctl";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Pick the config file: explicit flag, then environment, then the user
/// config directory.
pub fn config_path(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    config_dir: &Path,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }
    config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// [`config_path`] against the real environment.
pub fn default_config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    let env_value = std::env::var(CONFIG_ENV_VAR).ok();
    Ok(config_path(explicit, env_value.as_deref(), &config_dir))
}
