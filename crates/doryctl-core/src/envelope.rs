//! The normalized, kind-tagged projection handed to the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prune::prune_root;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    pub project_name: String,
    /// Selection context, e.g. `envName` for deploy.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub kind: String,
    pub metadata: Metadata,
    /// Surviving definition records, in source order.
    #[serde(default)]
    pub items: Vec<Value>,
    /// Server-reported definition error for the selected kind.
    #[serde(default)]
    pub err_msg: String,
}

impl Envelope {
    pub fn new(kind: &str, project_name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            metadata: Metadata {
                name: project_name.to_string(),
                project_name: project_name.to_string(),
                labels: BTreeMap::new(),
            },
            items: Vec::new(),
            err_msg: String::new(),
        }
    }

    pub fn with_label(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.to_string(), value.into());
        self
    }

    pub fn with_err_msg(mut self, err_msg: impl Into<String>) -> Self {
        self.err_msg = err_msg.into();
        self
    }

    pub fn push_item<T: Serialize>(&mut self, item: &T) -> Result<(), serde_json::Error> {
        self.items.push(serde_json::to_value(item)?);
        Ok(())
    }

    pub fn has_definition_error(&self) -> bool {
        !self.err_msg.is_empty()
    }

    /// The envelope as JSON with empty and zero fields removed.
    pub fn normalized(&self) -> Result<Value, serde_json::Error> {
        Ok(prune_root(serde_json::to_value(self)?))
    }
}
