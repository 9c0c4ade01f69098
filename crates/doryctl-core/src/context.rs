//! Application context passed explicitly into commands.

use std::path::{Path, PathBuf};

use crate::config::{
    ConfigStore, DoryConfig, Settings, SettingsOverrides, default_config_path,
};
use crate::error::RemoteError;
use crate::provider::HttpDefinitionProvider;

/// Resolved settings plus the config file they were read from.
///
/// Frontends build this once per invocation and hand it to commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    config_store: ConfigStore,
}

impl AppContext {
    pub fn new(settings: Settings, config_store: ConfigStore) -> Self {
        Self {
            settings,
            config_store,
        }
    }

    /// Load the config file (explicit path, `$DORYCTL_CONFIG` or the user
    /// config dir) and layer command-line overrides over it.
    pub fn from_overrides(
        config_path: Option<PathBuf>,
        overrides: &SettingsOverrides,
    ) -> anyhow::Result<Self> {
        let config_path = default_config_path(config_path.as_deref())?;
        Self::load(ConfigStore::from_path(config_path), overrides)
    }

    /// Like [`AppContext::from_overrides`] with a fixed store.
    pub fn load(config_store: ConfigStore, overrides: &SettingsOverrides) -> anyhow::Result<Self> {
        let file = config_store.load()?;
        let settings = Settings::resolve(&file, overrides)?;
        tracing::debug!(
            config = %config_store.config_path().display(),
            server_url = ?settings.server_url.as_ref().map(|u| u.as_str()),
            "Resolved settings"
        );
        Ok(Self::new(settings, config_store))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn config_path(&self) -> &Path {
        self.config_store.config_path()
    }

    /// Persisted config, without command-line overrides.
    pub fn stored_config(&self) -> anyhow::Result<DoryConfig> {
        self.config_store.load()
    }

    /// HTTP provider for the resolved server and token.
    pub fn http_provider(&self) -> Result<HttpDefinitionProvider, RemoteError> {
        HttpDefinitionProvider::from_settings(&self.settings)
    }
}
