//! Job de pipeline listo para enviar.
//!
//! Un `PipelineJob` toma un `PipelineGraph` ya validado y le asocia valores
//! concretos para sus inputs, el experimento y los settings a nivel de job
//! (compute y datastore por defecto). Se construye en cada invocación y
//! nunca se persiste localmente.

mod status;

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::GraphError;
use crate::pipeline::PipelineGraph;
use crate::step::IoType;

pub use status::{JobStatus, SubmittedJob};

/// Valor concreto de un input del pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobInput {
    /// Referencia a datos (`name@version`, URI, ...).
    Asset { io_type: IoType, path: String },
    Literal { value: String },
}

impl JobInput {
    pub fn asset(io_type: IoType, path: impl Into<String>) -> Self {
        JobInput::Asset { io_type, path: path.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        JobInput::Literal { value: value.into() }
    }

    pub fn io_type(&self) -> IoType {
        match self {
            JobInput::Asset { io_type, .. } => *io_type,
            JobInput::Literal { .. } => IoType::String,
        }
    }

    /// Ruta del asset o texto del literal.
    pub fn value(&self) -> &str {
        match self {
            JobInput::Asset { path, .. } => path,
            JobInput::Literal { value } => value,
        }
    }
}

/// Settings a nivel de job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobSettings {
    pub default_compute: Option<String>,
    pub default_datastore: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineJob {
    name: String,
    display_name: String,
    experiment_name: String,
    graph: PipelineGraph,
    inputs: IndexMap<String, JobInput>,
    pub settings: JobSettings,
    tags: IndexMap<String, String>,
}

impl PipelineJob {
    /// Nuevo job con nombre generado `<pipeline>_<10 hex>`.
    pub fn new(graph: PipelineGraph, experiment_name: impl Into<String>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("{}_{}", graph.name(), &suffix[..10]);
        Self { name,
               display_name: graph.name().to_string(),
               experiment_name: experiment_name.into(),
               graph,
               inputs: IndexMap::new(),
               settings: JobSettings::default(),
               tags: IndexMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    pub fn graph(&self) -> &PipelineGraph {
        &self.graph
    }

    pub fn inputs(&self) -> &IndexMap<String, JobInput> {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&JobInput> {
        self.inputs.get(name)
    }

    pub fn tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }

    /// Añade o reemplaza una etiqueta del job.
    pub fn tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Enlaza un valor a un input declarado del pipeline. Reemplaza un valor previo.
    pub fn bind(&mut self, input: &str, value: JobInput) -> Result<(), GraphError> {
        let expected = self.graph
                           .inputs()
                           .get(input)
                           .copied()
                           .ok_or_else(|| GraphError::UnknownPipelineInput(input.to_string()))?;
        let found = value.io_type();
        if found != expected {
            return Err(GraphError::TypeMismatch { node: self.graph.name().to_string(),
                                                  input: input.to_string(),
                                                  expected,
                                                  found });
        }
        self.inputs.insert(input.to_string(), value);
        Ok(())
    }

    /// Todos los inputs del pipeline deben tener valor antes de enviar.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self.graph.inputs().keys().find(|k| !self.inputs.contains_key(*k)) {
            Some(missing) => Err(GraphError::UnboundPipelineInput(missing.clone())),
            None => Ok(()),
        }
    }
}
