//! Per-kind selection: pick a collection out of the document, filter it by
//! module name and project it into an envelope plus table rows.
//!
//! Everything here is pure. Missing context (env, branch, step) is a
//! validation error; context that names something absent is `NotFound`.

use crate::document::{
    BuildDef, CustomOpsDef, CustomStepModuleDef, DeployContainerDef, Document,
    PackageDef,
};
use crate::envelope::Envelope;
use crate::error::{EngineError, ValidationError};
use crate::filter::NameFilter;
use crate::kind::Kind;

/// What to select: the kind, its context and the module-name filter.
#[derive(Debug, Clone)]
pub struct Selection {
    pub kind: Kind,
    pub env_name: Option<String>,
    pub branch_name: Option<String>,
    pub step_name: Option<String>,
    pub modules: NameFilter,
}

impl Selection {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            env_name: None,
            branch_name: None,
            step_name: None,
            modules: NameFilter::all(),
        }
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

    pub fn with_modules(mut self, modules: NameFilter) -> Self {
        self.modules = modules;
        self
    }

    /// Context value the kind requires, or a validation error naming the flag.
    fn require(&self, value: &Option<String>, flag: &'static str) -> Result<String, EngineError> {
        match value.as_deref() {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(ValidationError::MissingFlag {
                kind: self.kind.as_str(),
                flag,
            }
            .into()),
        }
    }
}

/// A selected kind ready for rendering.
#[derive(Debug, Clone)]
pub struct Projection {
    pub kind: Kind,
    pub envelope: Envelope,
    /// One row per item; cells follow `kind.columns()`.
    pub rows: Vec<Vec<String>>,
}

impl Projection {
    fn new(kind: Kind, document: &Document) -> Self {
        Self {
            kind,
            envelope: Envelope::new(kind.tag(), document.project_name()),
            rows: Vec::new(),
        }
    }

    fn push<T: serde::Serialize>(&mut self, item: &T, row: Vec<String>) -> Result<(), EngineError> {
        self.envelope.push_item(item)?;
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.kind.columns()
    }
}

impl Kind {
    /// Select this kind from `document` according to `selection`.
    pub fn select(self, document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
        match self {
            Kind::Build => select_build(document, selection),
            Kind::Package => select_package(document, selection),
            Kind::Deploy => select_deploy(document, selection),
            Kind::Pipeline => select_pipeline(document, selection),
            Kind::Ignore => select_ignore(document),
            Kind::Ops => select_ops(document, selection),
            Kind::Step => select_step(document, selection),
            Kind::Steps => select_steps(document),
        }
    }
}

/// Select `selection.kind` from `document`.
pub fn select(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    selection.kind.select(document, selection)
}

fn lines(values: &[String]) -> String {
    values.join("\n")
}

fn select_build(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let def = &document.project_def;
    let mut projection = Projection::new(Kind::Build, document);
    for build in selection.modules.apply(&def.build_defs, |d: &BuildDef| d.build_name.as_str()) {
        let row = vec![
            build.build_name.clone(),
            build.build_env.clone(),
            build.build_path.clone(),
            build.build_phase_id.to_string(),
            lines(&build.build_cmds),
        ];
        projection.push(build, row)?;
    }
    projection.envelope.err_msg = def.err_msg_build_defs.clone();
    Ok(projection)
}

fn select_package(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let def = &document.project_def;
    let mut projection = Projection::new(Kind::Package, document);
    for package in selection.modules.apply(&def.package_defs, |d: &PackageDef| d.package_name.as_str()) {
        let row = vec![
            package.package_name.clone(),
            lines(&package.related_builds),
            package.package_from.clone(),
            lines(&package.packages),
        ];
        projection.push(package, row)?;
    }
    projection.envelope.err_msg = def.err_msg_package_defs.clone();
    Ok(projection)
}

fn deploy_ports(deploy: &DeployContainerDef) -> String {
    fn protocol(p: &str) -> &str {
        if p.is_empty() { "TCP" } else { p }
    }

    let local = deploy
        .deploy_local_ports
        .iter()
        .map(|p| format!("{}/{}", p.port, protocol(&p.protocol)));
    let node = deploy
        .deploy_node_ports
        .iter()
        .map(|p| format!("{}:{}/{}", p.port, p.node_port, protocol(&p.protocol)));
    local.chain(node).collect::<Vec<_>>().join(",")
}

fn select_deploy(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let env_name = selection.require(&selection.env_name, "env")?;
    let env = document
        .environment(&env_name)
        .ok_or_else(|| EngineError::not_found("envName", &env_name))?;

    let mut projection = Projection::new(Kind::Deploy, document);
    for deploy in selection
        .modules
        .apply(&env.deploy_container_defs, |d: &DeployContainerDef| d.deploy_name.as_str())
    {
        let depends: Vec<String> = deploy
            .depend_services
            .iter()
            .map(|d| format!("{}:{}", d.depend_name, d.depend_port))
            .collect();
        let row = vec![
            deploy.deploy_name.clone(),
            deploy.related_package.clone(),
            deploy.deploy_replicas.to_string(),
            deploy_ports(deploy),
            lines(&depends),
        ];
        projection.push(deploy, row)?;
    }
    projection.envelope = projection
        .envelope
        .with_err_msg(env.err_msg_deploy_container_defs.clone())
        .with_label("envName", env.env_name.clone());
    Ok(projection)
}

fn select_pipeline(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let branch_name = selection.require(&selection.branch_name, "branch")?;
    let pipeline = document
        .pipeline(&branch_name)
        .ok_or_else(|| EngineError::not_found("branchName", &branch_name))?;
    let def = &pipeline.pipeline_def;

    let builds: Vec<String> = def
        .builds
        .iter()
        .map(|b| format!("{}: {}", b.name, b.run))
        .collect();
    let row = vec![
        pipeline.branch_name.clone(),
        lines(&pipeline.envs),
        lines(&pipeline.env_productions),
        def.is_auto_detect_build.to_string(),
        def.is_queue.to_string(),
        lines(&builds),
    ];

    let mut projection = Projection::new(Kind::Pipeline, document);
    projection.push(def, row)?;
    projection.envelope = projection
        .envelope
        .with_err_msg(pipeline.err_msg_pipeline_def.clone())
        .with_label("branchName", pipeline.branch_name.clone())
        .with_label("envs", pipeline.envs.join(","))
        .with_label("envProductions", pipeline.env_productions.join(","));
    Ok(projection)
}

fn select_ignore(document: &Document) -> Result<Projection, EngineError> {
    let def = &document.project_def;
    let mut projection = Projection::new(Kind::Ignore, document);
    for pattern in &def.docker_ignore_defs {
        projection.push(pattern, vec![pattern.clone()])?;
    }
    projection.envelope.err_msg = def.err_msg_docker_ignore_defs.clone();
    Ok(projection)
}

fn select_ops(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let def = &document.project_def;
    let mut projection = Projection::new(Kind::Ops, document);
    for ops in selection
        .modules
        .apply(&def.custom_ops_defs, |d: &CustomOpsDef| d.custom_ops_name.as_str())
    {
        let row = vec![
            ops.custom_ops_name.clone(),
            ops.custom_ops_desc.clone(),
            lines(&ops.custom_ops_steps),
        ];
        projection.push(ops, row)?;
    }
    projection.envelope.err_msg = def.err_msg_custom_ops_defs.clone();
    Ok(projection)
}

fn select_step(document: &Document, selection: &Selection) -> Result<Projection, EngineError> {
    let step_name = selection.require(&selection.step_name, "step")?;
    let env_name = selection.env_name.clone().filter(|e| !e.is_empty());

    let (step_defs, step_errors) = match &env_name {
        Some(env_name) => {
            let env = document
                .environment(env_name)
                .ok_or_else(|| EngineError::not_found("envName", env_name))?;
            (&env.custom_step_defs, &env.err_msg_custom_step_defs)
        }
        None => (
            &document.project_def.custom_step_defs,
            &document.project_def.err_msg_custom_step_defs,
        ),
    };
    let step = step_defs
        .get(&step_name)
        .ok_or_else(|| EngineError::not_found("stepName", &step_name))?;

    let enable_mode = step.effective_enable_mode();
    let mut projection = Projection::new(Kind::Step, document);
    for module in selection
        .modules
        .apply(&step.custom_step_module_defs, |d: &CustomStepModuleDef| d.module_name.as_str())
    {
        let row = vec![
            module.module_name.clone(),
            enable_mode.to_string(),
            lines(&module.related_step_modules),
            module.manual_enable.to_string(),
            module.param_input_yaml.clone(),
        ];
        projection.push(module, row)?;
    }
    projection.envelope = projection
        .envelope
        .with_err_msg(step_errors.get(&step_name).cloned().unwrap_or_default())
        .with_label("envName", env_name.unwrap_or_default())
        .with_label("stepName", step_name)
        .with_label("enableMode", enable_mode);
    Ok(projection)
}

fn select_steps(document: &Document) -> Result<Projection, EngineError> {
    let mut projection = Projection::new(Kind::Steps, document);
    for conf in &document.custom_step_confs {
        let row = vec![
            conf.custom_step_name.clone(),
            conf.custom_step_desc.clone(),
            conf.custom_step_action_desc.clone(),
            conf.is_env_diff.to_string(),
            conf.param_input_yaml_def.clone(),
        ];
        projection.push(conf, row)?;
    }
    Ok(projection)
}
