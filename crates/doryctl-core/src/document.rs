//! Typed view over the project definition document served by dory-core.
//!
//! The server owns the schema, so every record keeps the fields it does not
//! model in `extra`; JSON and YAML output therefore never drop server data.
//! Collections may arrive as `null` and are read as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A project's full definition, as returned under `data.project`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub project_info: ProjectInfo,
    #[serde(default)]
    pub project_def: ProjectDef,
    #[serde(
        default,
        deserialize_with = "nullable",
        alias = "availableEnvironments"
    )]
    pub project_available_envs: Vec<AvailableEnv>,
    #[serde(default, deserialize_with = "nullable", alias = "pipelines")]
    pub project_pipelines: Vec<ProjectPipeline>,
    #[serde(default, deserialize_with = "nullable", alias = "customStepConfigs")]
    pub custom_step_confs: Vec<CustomStepConf>,
}

impl Document {
    pub fn project_name(&self) -> &str {
        &self.project_info.project_name
    }

    pub fn environment(&self, env_name: &str) -> Option<&AvailableEnv> {
        self.project_available_envs
            .iter()
            .find(|env| env.env_name == env_name)
    }

    pub fn pipeline(&self, branch_name: &str) -> Option<&ProjectPipeline> {
        self.project_pipelines
            .iter()
            .find(|pipeline| pipeline.branch_name == branch_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(default)]
    pub project_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project-level definitions, independent of any environment or branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDef {
    #[serde(default, deserialize_with = "nullable")]
    pub build_defs: Vec<BuildDef>,
    #[serde(default, deserialize_with = "nullable")]
    pub package_defs: Vec<PackageDef>,
    #[serde(default, deserialize_with = "nullable")]
    pub docker_ignore_defs: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_ops_defs: Vec<CustomOpsDef>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_step_defs: BTreeMap<String, CustomStepDef>,

    #[serde(default)]
    pub err_msg_build_defs: String,
    #[serde(default)]
    pub err_msg_package_defs: String,
    #[serde(default)]
    pub err_msg_docker_ignore_defs: String,
    #[serde(default)]
    pub err_msg_custom_ops_defs: String,
    #[serde(default, deserialize_with = "nullable")]
    pub err_msg_custom_step_defs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDef {
    #[serde(default)]
    pub build_name: String,
    #[serde(default)]
    pub build_env: String,
    #[serde(default)]
    pub build_path: String,
    #[serde(default, rename = "buildPhaseID")]
    pub build_phase_id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub build_cmds: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDef {
    #[serde(default)]
    pub package_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub related_builds: Vec<String>,
    #[serde(default)]
    pub package_from: String,
    #[serde(default, deserialize_with = "nullable")]
    pub packages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOpsDef {
    #[serde(default)]
    pub custom_ops_name: String,
    #[serde(default)]
    pub custom_ops_desc: String,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_ops_steps: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deploy targets and environment-related custom steps of one environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableEnv {
    #[serde(default)]
    pub env_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub deploy_container_defs: Vec<DeployContainerDef>,
    #[serde(default)]
    pub err_msg_deploy_container_defs: String,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_step_defs: BTreeMap<String, CustomStepDef>,
    #[serde(default, deserialize_with = "nullable")]
    pub err_msg_custom_step_defs: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployContainerDef {
    #[serde(default)]
    pub deploy_name: String,
    #[serde(default)]
    pub related_package: String,
    #[serde(default)]
    pub deploy_replicas: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub deploy_local_ports: Vec<LocalPort>,
    #[serde(default, deserialize_with = "nullable")]
    pub deploy_node_ports: Vec<NodePort>,
    #[serde(default, deserialize_with = "nullable")]
    pub depend_services: Vec<DependService>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalPort {
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub protocol: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePort {
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub node_port: i64,
    #[serde(default)]
    pub protocol: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependService {
    #[serde(default)]
    pub depend_name: String,
    #[serde(default)]
    pub depend_port: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A branch and the pipeline definition that runs for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPipeline {
    #[serde(default)]
    pub branch_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub envs: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub env_productions: Vec<String>,
    #[serde(default)]
    pub pipeline_def: PipelineDef,
    #[serde(default)]
    pub err_msg_pipeline_def: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDef {
    #[serde(default, deserialize_with = "nullable")]
    pub builds: Vec<PipelineBuild>,
    #[serde(default)]
    pub is_auto_detect_build: bool,
    #[serde(default)]
    pub is_queue: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineBuild {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub run: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One custom step as configured for a project (or for one environment).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStepDef {
    #[serde(default)]
    pub enable_mode: String,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_step_module_defs: Vec<CustomStepModuleDef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomStepDef {
    /// Steps without an explicit mode are enabled manually.
    pub fn effective_enable_mode(&self) -> &str {
        if self.enable_mode.is_empty() {
            "manual"
        } else {
            &self.enable_mode
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStepModuleDef {
    #[serde(default)]
    pub module_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub related_step_modules: Vec<String>,
    #[serde(default)]
    pub manual_enable: bool,
    #[serde(default)]
    pub param_input_yaml: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A custom step kind offered by the server to every project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStepConf {
    #[serde(default)]
    pub custom_step_name: String,
    #[serde(default)]
    pub custom_step_desc: String,
    #[serde(default)]
    pub custom_step_action_desc: String,
    #[serde(default)]
    pub is_env_diff: bool,
    #[serde(default)]
    pub param_input_yaml_def: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
