//! Login and logout: persist or clear the server session in config.toml.

use anyhow::Context;

use crate::config::{ConfigStore, DoryConfig, parse_server_url};

/// Options for `login`.
#[derive(Debug, Clone, Default)]
pub struct LoginOptions {
    /// Server URL; falls back to the stored one when absent
    pub server_url: Option<String>,
    pub access_token: String,
    pub timeout: Option<u64>,
    pub insecure: Option<bool>,
}

impl LoginOptions {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }
}

/// What a session command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub server_url: Option<String>,
    /// False when logout found no token to clear
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct SessionCommand {
    store: ConfigStore,
}

impl SessionCommand {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(ConfigStore::with_defaults()?))
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Store the server URL and access token.
    pub fn login(&self, options: &LoginOptions) -> anyhow::Result<SessionReport> {
        let mut config = self.store.load()?;

        let server_url = options
            .server_url
            .clone()
            .or_else(|| config.server_url.clone())
            .filter(|s| !s.is_empty())
            .context("serverURL required, pass --server-url")?;
        let server_url = parse_server_url(&server_url)?;
        if options.access_token.is_empty() {
            anyhow::bail!("access token required");
        }

        config.server_url = Some(server_url.as_str().trim_end_matches('/').to_string());
        config.access_token = Some(options.access_token.clone());
        if options.timeout.is_some() {
            config.timeout = options.timeout;
        }
        if options.insecure.is_some() {
            config.insecure = options.insecure;
        }
        config.validate()?;
        self.store.save(&config)?;

        tracing::info!(
            server_url = ?config.server_url,
            config = %self.store.config_path().display(),
            "Logged in"
        );
        Ok(SessionReport {
            server_url: config.server_url,
            changed: true,
        })
    }

    /// Clear the stored access token, keeping the server URL.
    pub fn logout(&self) -> anyhow::Result<SessionReport> {
        let mut config: DoryConfig = self.store.load()?;
        let changed = config.access_token.take().is_some();
        if changed {
            self.store.save(&config)?;
        }
        tracing::info!(changed, "Logged out");
        Ok(SessionReport {
            server_url: config.server_url,
            changed,
        })
    }
}
