//! doryctl Core Library
//!
//! Reads project definitions from a dory-core server, selects one kind of
//! definition and renders it as a table, JSON or YAML.

pub mod commands;
pub mod config;
pub mod context;
pub mod document;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod kind;
pub mod provider;
pub mod prune;
pub mod render;
pub mod select;
pub mod validate;

/// Version reported by `doryctl version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-exports of commonly used types
pub mod prelude {
    // Commands
    pub use crate::commands::{
        DefGetCommand, DefGetOptions, DefGetReport, LoginOptions, SessionCommand,
    };

    // Configuration
    pub use crate::config::{ConfigStore, DoryConfig, Settings, SettingsOverrides};
    pub use crate::context::AppContext;

    // Definitions
    pub use crate::document::Document;
    pub use crate::envelope::Envelope;
    pub use crate::kind::Kind;
    pub use crate::render::OutputFormat;
    pub use crate::select::{Projection, Selection};

    // Errors
    pub use crate::error::{EngineError, RemoteError, ValidationError};

    // Providers
    pub use crate::provider::{DefinitionProvider, HttpDefinitionProvider};
}
