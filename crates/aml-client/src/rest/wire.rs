//! Formato de cable del control plane.
//!
//! El recurso job usa camelCase en el nivel exterior; los nodos dentro de
//! `jobs` usan snake_case. Los enlaces entre nodos viajan como expresiones
//! `${{parent...}}` que resuelve el servicio.
//!
//! `code` viaja tal cual (ruta relativa, p. ej. `data-science/src/prep`).
//! No se sube código local: el servicio sólo puede ejecutar el job si esa
//! ruta ya es resoluble en el lado remoto.

use std::collections::BTreeMap;

use aml_core::{Binding, IoType, JobInput, JobStatus, PipelineJob, StepNode, SubmittedJob};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::WorkspaceScope;

/// Propiedad del job donde se registra el hash de la definición.
pub const DEFINITION_HASH_PROPERTY: &str = "amlflow.definition_hash";

const ASSET_PREFIX: &str = "azureml:";

/// `azureml:<ref>` salvo que la referencia ya traiga esquema.
pub fn asset_uri(reference: &str) -> String {
    if reference.starts_with(ASSET_PREFIX) || reference.contains("://") {
        reference.to_string()
    } else {
        format!("{ASSET_PREFIX}{reference}")
    }
}

fn arm_reference(id: String) -> String {
    format!("{ASSET_PREFIX}{id}")
}

fn literal(value: impl Into<String>) -> Value {
    json!({ "job_input_type": "literal", "value": value.into() })
}

fn encode_binding(binding: &Binding) -> Value {
    match binding {
        Binding::PipelineInput { name } => literal(format!("${{{{parent.inputs.{name}}}}}")),
        Binding::NodeOutput { node, output } => literal(format!("${{{{parent.jobs.{node}.outputs.{output}}}}}")),
        Binding::Literal { value } => literal(value.as_str()),
    }
}

fn encode_slots(slots: &indexmap::IndexMap<String, IoType>) -> Value {
    let map: Map<String, Value> = slots.iter().map(|(k, t)| (k.clone(), json!({ "type": t.as_str() }))).collect();
    Value::Object(map)
}

fn encode_node(job: &PipelineJob, node: &StepNode) -> Value {
    let step = node.step();
    let inputs: Map<String, Value> = node.bindings().iter().map(|(k, b)| (k.clone(), encode_binding(b))).collect();
    let outputs: Map<String, Value> =
        step.outputs()
            .iter()
            .map(|(out, io_type)| {
                let value = match job.graph().output_alias(node.name(), out) {
                    Some(alias) => json!({ "type": "literal", "value": format!("${{{{parent.outputs.{alias}}}}}") }),
                    None => json!({ "job_output_type": io_type.as_str() }),
                };
                (out.clone(), value)
            })
            .collect();
    json!({
        "type": "command",
        "name": node.name(),
        "display_name": step.display_name(),
        "component": {
            "type": "command",
            "name": step.name(),
            "display_name": step.display_name(),
            // sin subida de código: debe existir ya en remoto
            "code": step.code(),
            "command": step.command().as_str(),
            "environment": asset_uri(step.environment()),
            "inputs": encode_slots(step.inputs()),
            "outputs": encode_slots(step.outputs()),
        },
        "inputs": inputs,
        "outputs": outputs,
    })
}

fn encode_job_input(input: &JobInput) -> Value {
    match input {
        JobInput::Asset { io_type, path } => json!({
            "jobInputType": io_type.as_str(),
            "uri": asset_uri(path),
            "mode": "ReadOnlyMount",
        }),
        JobInput::Literal { value } => json!({ "jobInputType": "literal", "value": value }),
    }
}

/// Cuerpo del PUT `jobs/{name}`.
pub fn encode_pipeline_job(job: &PipelineJob, scope: &WorkspaceScope) -> Value {
    let graph = job.graph();
    let inputs: Map<String, Value> = job.inputs().iter().map(|(k, v)| (k.clone(), encode_job_input(v))).collect();
    let outputs: Map<String, Value> = graph.outputs()
                                           .keys()
                                           .map(|alias| {
                                               let io_type = graph.output_type(alias).unwrap_or(IoType::UriFolder);
                                               (alias.clone(), json!({ "jobOutputType": io_type.as_str(), "mode": "ReadWriteMount" }))
                                           })
                                           .collect();
    let jobs: Map<String, Value> = graph.nodes().map(|n| (n.name().to_string(), encode_node(job, n))).collect();

    let mut settings = Map::new();
    if let Some(compute) = &job.settings.default_compute {
        settings.insert("default_compute".into(), Value::String(arm_reference(scope.compute_id(compute))));
    }
    if let Some(datastore) = &job.settings.default_datastore {
        settings.insert("default_datastore".into(), Value::String(arm_reference(scope.datastore_id(datastore))));
    }

    json!({
        "properties": {
            "jobType": "Pipeline",
            "displayName": job.display_name(),
            "experimentName": job.experiment_name(),
            "tags": job.tags(),
            "properties": { DEFINITION_HASH_PROPERTY: graph.definition_hash() },
            "inputs": inputs,
            "outputs": outputs,
            "jobs": jobs,
            "settings": settings,
        }
    })
}

// ---------- respuestas ----------

#[derive(Debug, Deserialize)]
pub struct ResourceList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Versión de entorno: `name` es el número de versión.
#[derive(Debug, Deserialize)]
pub struct EnvironmentVersionResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ComputeResourceWire {
    pub name: String,
    #[serde(default)]
    pub properties: ComputeProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeProperties {
    #[serde(default)]
    pub compute_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobResource {
    pub name: String,
    #[serde(default)]
    pub properties: JobProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProperties {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub experiment_name: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, JobService>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobService {
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl JobResource {
    pub fn into_submitted(self) -> SubmittedJob {
        let status = self.properties
                         .status
                         .as_deref()
                         .and_then(|s| s.parse::<JobStatus>().ok())
                         .unwrap_or(JobStatus::Unknown);
        let studio_url = self.properties.services.get("Studio").and_then(|s| s.endpoint.clone());
        SubmittedJob { name: self.name,
                       experiment_name: self.properties.experiment_name,
                       studio_url,
                       status }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceResource {
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetails {
    /// nombre de fichero -> URL firmada
    #[serde(default)]
    pub log_files: BTreeMap<String, String>,
}
