//! Output rendering for selected definitions.
//!
//! Rendering is format-only: it never filters or reorders what the selector
//! produced.

pub mod table;

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, ValidationError};
use crate::select::Projection;

pub use table::render_table;

/// Output format for `def get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned table, one column set per kind
    #[default]
    Table,
    /// Pretty-printed JSON of the normalized envelope
    Json,
    /// YAML of the normalized envelope
    Yaml,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(ValidationError::UnknownOutput(other.to_string())),
        }
    }
}

/// Render a projection in the requested format.
pub fn render(projection: &Projection, format: OutputFormat) -> Result<String, EngineError> {
    match format {
        OutputFormat::Table => Ok(render_table(projection.columns(), &projection.rows)),
        OutputFormat::Json => {
            let value = projection.envelope.normalized()?;
            let mut out = serde_json::to_string_pretty(&value)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => {
            let value = projection.envelope.normalized()?;
            Ok(serde_yaml::to_string(&value)?)
        }
    }
}
