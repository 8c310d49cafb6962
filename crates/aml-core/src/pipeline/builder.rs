use indexmap::IndexMap;

use super::graph::{Binding, PipelineGraph, StepNode};
use crate::errors::GraphError;
use crate::step::{CommandStep, IoType};

/// Handle de un nodo ya añadido; da acceso tipado a sus salidas.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    name: String,
    outputs: IndexMap<String, IoType>,
}

impl NodeHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self, output: &str) -> Result<OutputHandle, GraphError> {
        let io_type = self.outputs
                          .get(output)
                          .copied()
                          .ok_or_else(|| GraphError::UnknownOutput { node: self.name.clone(),
                                                                     output: output.to_string() })?;
        Ok(OutputHandle { node: self.name.clone(),
                          output: output.to_string(),
                          io_type })
    }
}

/// Salida concreta de un nodo (`node.outputs.output`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputHandle {
    pub node: String,
    pub output: String,
    pub io_type: IoType,
}

impl From<OutputHandle> for Binding {
    fn from(h: OutputHandle) -> Self {
        Binding::NodeOutput { node: h.node, output: h.output }
    }
}

impl From<&OutputHandle> for Binding {
    fn from(h: &OutputHandle) -> Self {
        h.clone().into()
    }
}

/// Construcción declarativa del pipeline.
///
/// ```ignore
/// let mut b = PipelineBuilder::new("demo");
/// let raw = b.input("raw_data", IoType::UriFile)?;
/// let prep = b.add_node("prep", &prep_step, [("raw_data", raw)])?;
/// b.output("train", prep.output("train_data")?)?;
/// let graph = b.build()?;
/// ```
#[derive(Debug)]
pub struct PipelineBuilder {
    name: String,
    inputs: IndexMap<String, IoType>,
    nodes: IndexMap<String, StepNode>,
    outputs: IndexMap<String, (String, String)>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               inputs: IndexMap::new(),
               nodes: IndexMap::new(),
               outputs: IndexMap::new() }
    }

    /// Declara un input del pipeline y devuelve el binding que lo referencia.
    pub fn input(&mut self, name: impl Into<String>, io_type: IoType) -> Result<Binding, GraphError> {
        let name = name.into();
        if self.inputs.insert(name.clone(), io_type).is_some() {
            return Err(GraphError::DuplicatePipelineInput(name));
        }
        Ok(Binding::pipeline_input(name))
    }

    /// Añade un nodo que instancia `step`. Los tipos se comprueban en `build`.
    pub fn add_node<I, K, B>(&mut self, name: impl Into<String>, step: &CommandStep, bindings: I) -> Result<NodeHandle, GraphError>
        where I: IntoIterator<Item = (K, B)>,
              K: Into<String>,
              B: Into<Binding>
    {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        let bindings: IndexMap<String, Binding> = bindings.into_iter().map(|(k, b)| (k.into(), b.into())).collect();
        let handle = NodeHandle { name: name.clone(),
                                  outputs: step.outputs().clone() };
        self.nodes.insert(name.clone(),
                          StepNode { name,
                                     step: step.clone(),
                                     bindings });
        Ok(handle)
    }

    /// Publica la salida de un nodo como salida del pipeline bajo `alias`.
    pub fn output(&mut self, alias: impl Into<String>, handle: OutputHandle) -> Result<(), GraphError> {
        let alias = alias.into();
        if self.outputs.contains_key(&alias) {
            return Err(GraphError::DuplicatePipelineOutput(alias));
        }
        self.outputs.insert(alias, (handle.node, handle.output));
        Ok(())
    }

    pub fn build(self) -> Result<PipelineGraph, GraphError> {
        let graph = PipelineGraph { name: self.name,
                                    inputs: self.inputs,
                                    nodes: self.nodes,
                                    outputs: self.outputs };
        graph.validate()?;
        Ok(graph)
    }
}
