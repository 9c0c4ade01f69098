//! On-disk schema of `config.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

/// Persisted client settings. Every field is optional; flags fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoryConfig {
    /// dory-core server URL, e.g. `https://dory.example.com:8080`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl DoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(server_url) = &self.server_url {
            parse_server_url(server_url)?;
        }
        if self.timeout == Some(0) {
            anyhow::bail!("timeout must be greater than 0 seconds");
        }
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.server_url.is_some() && self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Parse a server URL, accepting only http and https.
pub fn parse_server_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).map_err(|e| anyhow::anyhow!("Invalid serverURL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!(
            "Invalid serverURL '{}': scheme must be http or https, got {}",
            raw,
            other
        ),
    }
}
