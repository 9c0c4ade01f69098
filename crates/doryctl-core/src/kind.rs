//! The closed set of definition kinds that `def get` can select.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A selectable category of project definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Build,
    Package,
    Deploy,
    Pipeline,
    Ignore,
    Ops,
    Step,
    Steps,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::Build,
        Kind::Package,
        Kind::Deploy,
        Kind::Pipeline,
        Kind::Ignore,
        Kind::Ops,
        Kind::Step,
        Kind::Steps,
    ];

    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Build => "build",
            Kind::Package => "package",
            Kind::Deploy => "deploy",
            Kind::Pipeline => "pipeline",
            Kind::Ignore => "ignore",
            Kind::Ops => "ops",
            Kind::Step => "step",
            Kind::Steps => "steps",
        }
    }

    /// Envelope `kind` tag, named after the document collection.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Build => "buildDefs",
            Kind::Package => "packageDefs",
            Kind::Deploy => "deployContainerDefs",
            Kind::Pipeline => "pipelineDef",
            Kind::Ignore => "dockerIgnoreDefs",
            Kind::Ops => "customOpsDefs",
            Kind::Step => "customStepDefs",
            Kind::Steps => "customStepConfs",
        }
    }

    /// Table columns, in display order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Kind::Build => &["Name", "Env", "Path", "PhaseID", "Cmds"],
            Kind::Package => &["Name", "Builds", "From", "Dockerfile"],
            Kind::Deploy => &["Name", "Package", "Replicas", "Ports", "Depends"],
            Kind::Pipeline => &["Name", "Envs", "EnvProds", "AutoDetect", "Queue", "Builds"],
            Kind::Ignore => &["Ignore"],
            Kind::Ops => &["Name", "Desc", "Steps"],
            Kind::Step => &["Name", "EnableMode", "RelateModules", "ManualEnable", "Params"],
            Kind::Steps => &["Name", "Desc", "Action", "EnvDiff", "Params"],
        }
    }

    /// Whether module names on the command line filter this kind's items.
    pub fn filters_by_name(self) -> bool {
        !matches!(self, Kind::Pipeline | Kind::Ignore | Kind::Steps)
    }

    /// Context flag this kind cannot be selected without.
    pub fn required_flag(self) -> Option<&'static str> {
        match self {
            Kind::Deploy => Some("env"),
            Kind::Pipeline => Some("branch"),
            Kind::Step => Some("step"),
            _ => None,
        }
    }

    fn expected_list() -> String {
        Kind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind {
                got: s.to_string(),
                expected: Kind::expected_list(),
            })
    }
}
