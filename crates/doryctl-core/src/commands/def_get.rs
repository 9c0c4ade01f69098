//! `def get` command implementation.
//!
//! Validates the request, fetches the project document, selects one kind of
//! definition and reports any definition error the server attached to it.

use crate::error::{EngineError, ValidationError};
use crate::filter::NameFilter;
use crate::kind::Kind;
use crate::provider::DefinitionProvider;
use crate::render::{self, OutputFormat};
use crate::select::{Projection, Selection, select};
use crate::validate::validate_minus_name_id;

/// Raw `def get` arguments, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct DefGetOptions {
    pub project_name: String,
    pub kind: String,
    pub module_names: Vec<String>,
    pub env_name: Option<String>,
    pub branch_name: Option<String>,
    pub step_name: Option<String>,
    /// `yaml`, `json`, or empty for a table
    pub output: String,
}

impl DefGetOptions {
    pub fn new(project_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, env_name: impl Into<String>) -> Self {
        self.env_name = Some(env_name.into());
        self
    }

    pub fn with_branch(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }

    pub fn with_step(mut self, step_name: impl Into<String>) -> Self {
        self.step_name = Some(step_name.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Check the arguments without touching the network.
    pub fn validate(&self) -> Result<DefGetRequest, ValidationError> {
        if self.project_name.is_empty() {
            return Err(ValidationError::MissingProjectName);
        }
        if self.kind.is_empty() {
            return Err(ValidationError::MissingKind);
        }
        let kind: Kind = self.kind.parse()?;
        validate_minus_name_id("projectName", &self.project_name)?;

        let mut selection = Selection::new(kind);
        match kind.required_flag() {
            Some("env") => selection.env_name = Some(required(&self.env_name, kind, "env")?),
            Some("branch") => {
                selection.branch_name = Some(required(&self.branch_name, kind, "branch")?)
            }
            Some("step") => selection.step_name = Some(required(&self.step_name, kind, "step")?),
            _ => {}
        }
        // step may also be scoped to an environment
        if kind == Kind::Step {
            selection.env_name = self.env_name.clone().filter(|e| !e.is_empty());
        }

        for name in &self.module_names {
            validate_minus_name_id("moduleName", name)?;
        }
        if !self.module_names.is_empty() && !kind.filters_by_name() {
            tracing::warn!(kind = %kind, "module names are ignored for this kind");
        }
        selection.modules = NameFilter::new(self.module_names.iter().cloned());

        let format: OutputFormat = self.output.parse()?;

        Ok(DefGetRequest {
            project_name: self.project_name.clone(),
            selection,
            format,
        })
    }
}

fn required(
    value: &Option<String>,
    kind: Kind,
    flag: &'static str,
) -> Result<String, ValidationError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingFlag {
            kind: kind.as_str(),
            flag,
        }),
    }
}

/// A validated `def get` request.
#[derive(Debug, Clone)]
pub struct DefGetRequest {
    pub project_name: String,
    pub selection: Selection,
    pub format: OutputFormat,
}

/// Result of `def get`: the selection plus how to print it.
#[derive(Debug, Clone)]
pub struct DefGetReport {
    pub projection: Projection,
    pub format: OutputFormat,
}

impl DefGetReport {
    pub fn render(&self) -> Result<String, EngineError> {
        render::render(&self.projection, self.format)
    }

    /// The definition error reported by the server, if any.
    pub fn definition_error(&self) -> Option<&str> {
        let err_msg = self.projection.envelope.err_msg.as_str();
        (!err_msg.is_empty()).then_some(err_msg)
    }
}

/// `def get` over any document provider.
#[derive(Debug)]
pub struct DefGetCommand<P> {
    provider: P,
}

impl<P: DefinitionProvider> DefGetCommand<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn execute(&self, options: &DefGetOptions) -> Result<DefGetReport, EngineError> {
        let request = options.validate()?;
        self.run(&request)
    }

    /// Execute an already validated request.
    pub fn run(&self, request: &DefGetRequest) -> Result<DefGetReport, EngineError> {
        let mut document = self
            .provider
            .fetch_project_definition(&request.project_name)?;
        if document.project_info.project_name.is_empty() {
            document.project_info.project_name = request.project_name.clone();
        }

        let projection = select(&document, &request.selection)?;
        surface_definition_error(&projection);

        Ok(DefGetReport {
            projection,
            format: request.format,
        })
    }
}

/// Log a server-reported definition error once; selection output still goes out.
fn surface_definition_error(projection: &Projection) {
    if projection.envelope.has_definition_error() {
        tracing::error!(kind = %projection.kind, "{}", projection.envelope.err_msg);
    }
}
