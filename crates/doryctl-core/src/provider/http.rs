//! Fetch project definitions from a dory-core server over HTTP.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::config::Settings;
use crate::document::Document;
use crate::error::RemoteError;

use super::DefinitionProvider;

const USER_AGENT: &str = concat!("doryctl/", env!("CARGO_PKG_VERSION"));

/// Reads `GET {server}/api/cicd/projectDef/{project}`.
#[derive(Debug, Clone)]
pub struct HttpDefinitionProvider {
    server_url: Url,
    access_token: String,
    timeout: Duration,
    insecure: bool,
}

impl HttpDefinitionProvider {
    pub fn new(server_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            server_url,
            access_token: access_token.into(),
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            insecure: false,
        }
    }

    /// Build from resolved settings; fails if the client is not logged in.
    pub fn from_settings(settings: &Settings) -> Result<Self, RemoteError> {
        let (Some(server_url), Some(access_token)) =
            (settings.server_url.clone(), settings.access_token.clone())
        else {
            return Err(RemoteError::NotLoggedIn);
        };
        Ok(Self::new(server_url, access_token)
            .with_timeout(settings.timeout)
            .with_insecure(settings.insecure))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Full URL of a project's definition endpoint.
    pub fn project_def_url(&self, project_name: &str) -> String {
        format!(
            "{}/api/cicd/projectDef/{}",
            self.server_url.as_str().trim_end_matches('/'),
            project_name
        )
    }

    /// Fetch and decode a project definition.
    pub async fn fetch(&self, project_name: &str) -> Result<Document, RemoteError> {
        let url = self.project_def_url(project_name);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .map_err(|source| RemoteError::Transport {
                url: url.clone(),
                source,
            })?;

        tracing::debug!(
            "curl -v -XGET -H \"Content-Type: application/json\" -H \"X-Access-Token: ******\" '{}'",
            url
        );

        let response = client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("X-Access-Token", &self.access_token)
            .send()
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.clone(),
                source,
            })?;

        let code = response.status();
        for (key, value) in response.headers() {
            tracing::debug!("  {}: {:?}", key, value);
        }
        let text = response
            .text()
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.clone(),
                source,
            })?;
        let body: Option<Value> = serde_json::from_str(&text).ok();
        if let Some(body) = &body {
            tracing::debug!(
                "GET {} {} in {}\n{}",
                url,
                code,
                field(body, "duration"),
                serde_json::to_string_pretty(body).unwrap_or_else(|_| text.clone())
            );
        }

        if !code.is_success() {
            return Err(status_error(url, code, body.as_ref(), &text));
        }

        let body = body.ok_or_else(|| RemoteError::Decode {
            url: url.clone(),
            message: "response is not JSON".to_string(),
        })?;
        tracing::info!("GET {} [{}] {}", url, field(&body, "status"), field(&body, "msg"));

        let project = body
            .pointer("/data/project")
            .cloned()
            .ok_or_else(|| RemoteError::Decode {
                url: url.clone(),
                message: "missing data.project".to_string(),
            })?;
        serde_json::from_value(project).map_err(|e| RemoteError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

impl DefinitionProvider for HttpDefinitionProvider {
    fn fetch_project_definition(&self, project_name: &str) -> Result<Document, RemoteError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.fetch(project_name))
    }
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn status_error(url: String, code: StatusCode, body: Option<&Value>, text: &str) -> RemoteError {
    let (status, message) = match body {
        Some(body) => (field(body, "status").to_string(), field(body, "msg").to_string()),
        None => (String::new(), text.trim().to_string()),
    };
    RemoteError::Status {
        url,
        code: code.as_u16(),
        status: if status.is_empty() {
            code.to_string()
        } else {
            status
        },
        message,
    }
}
