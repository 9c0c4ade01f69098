//! Client configuration.
//!
//! Settings come from two layers:
//! - config.toml (persisted by `login`)
//! - command-line flags, which win over the file

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

use std::time::Duration;

use url::Url;

pub use parser::{parse_config_toml, parse_config_toml_str, to_toml};
pub use paths::{CONFIG_ENV_VAR, config_path, default_config_path};
pub use schema::{DoryConfig, parse_server_url};
pub use store::ConfigStore;

/// Request timeout used when neither flag nor file sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub server_url: Option<String>,
    pub access_token: Option<String>,
    pub timeout: Option<u64>,
    /// `--insecure` can only switch verification off.
    pub insecure: bool,
    pub verbose: bool,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: Option<Url>,
    pub access_token: Option<String>,
    pub timeout: Duration,
    pub insecure: bool,
    pub verbose: bool,
}

impl Settings {
    /// Layer flags over the persisted config.
    pub fn resolve(file: &DoryConfig, overrides: &SettingsOverrides) -> anyhow::Result<Self> {
        let server_url = overrides
            .server_url
            .as_deref()
            .or(file.server_url.as_deref())
            .filter(|s| !s.is_empty())
            .map(parse_server_url)
            .transpose()?;

        let access_token = overrides
            .access_token
            .clone()
            .or_else(|| file.access_token.clone())
            .filter(|t| !t.is_empty());

        let timeout_secs = overrides
            .timeout
            .or(file.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            anyhow::bail!("--timeout must be greater than 0 seconds");
        }

        Ok(Self {
            server_url,
            access_token,
            timeout: Duration::from_secs(timeout_secs),
            insecure: overrides.insecure || file.insecure.unwrap_or(false),
            verbose: overrides.verbose,
        })
    }
}
