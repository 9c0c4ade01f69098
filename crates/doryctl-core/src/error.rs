//! Error taxonomy for definition selection and remote access.
//!
//! Only failures that stop an invocation live here. Definition errors
//! reported by the server travel inside the envelope instead.

use thiserror::Error;

/// Malformed caller input, detected before any remote call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("projectName required")]
    MissingProjectName,

    #[error("kind required")]
    MissingKind,

    #[error("kind must be {expected}, got '{got}'")]
    UnknownKind { got: String, expected: String },

    #[error("kind is {kind}, --{flag} is required")]
    MissingFlag { kind: &'static str, flag: &'static str },

    #[error("{field} '{value}' format error: {reason}")]
    InvalidName {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("--output must be yaml or json, got '{0}'")]
    UnknownOutput(String),
}

/// Failures talking to the dory-core server.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("serverURL or access token not set, run `doryctl login` first")]
    NotLoggedIn,

    #[error("GET {url} [{status}] {message}")]
    Status {
        url: String,
        code: u16,
        status: String,
        message: String,
    },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned an unreadable body: {message}")]
    Decode { url: String, message: String },

    #[error("failed to start HTTP runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Everything that can abort a `def get` invocation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{what} {name} not exists")]
    NotFound { what: &'static str, name: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("failed to serialize definition: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl EngineError {
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    /// True for failures caused by the caller's input rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
