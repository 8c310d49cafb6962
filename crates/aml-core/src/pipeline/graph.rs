use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;

use crate::constants::MODEL_VERSION;
use crate::errors::GraphError;
use crate::hashing::hash_value;
use crate::step::{CommandStep, IoType};

/// Origen del valor de un input de nodo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    PipelineInput { name: String },
    NodeOutput { node: String, output: String },
    Literal { value: String },
}

impl Binding {
    pub fn pipeline_input(name: impl Into<String>) -> Self {
        Binding::PipelineInput { name: name.into() }
    }

    pub fn node_output(node: impl Into<String>, output: impl Into<String>) -> Self {
        Binding::NodeOutput { node: node.into(), output: output.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Binding::Literal { value: value.into() }
    }
}

/// Instancia de un step dentro del grafo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepNode {
    pub(crate) name: String,
    pub(crate) step: CommandStep,
    pub(crate) bindings: IndexMap<String, Binding>,
}

impl StepNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step(&self) -> &CommandStep {
        &self.step
    }

    pub fn bindings(&self) -> &IndexMap<String, Binding> {
        &self.bindings
    }
}

/// Arista de datos: salida de un nodo consumida por el input de otro.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from_node: String,
    pub from_output: String,
    pub to_node: String,
    pub to_input: String,
}

/// Grafo validado. Sólo se obtiene a través de `PipelineBuilder::build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineGraph {
    pub(crate) name: String,
    pub(crate) inputs: IndexMap<String, IoType>,
    pub(crate) nodes: IndexMap<String, StepNode>,
    /// alias -> (nodo, salida)
    pub(crate) outputs: IndexMap<String, (String, String)>,
}

impl PipelineGraph {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &IndexMap<String, IoType> {
        &self.inputs
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StepNode> {
        self.nodes.values()
    }

    pub fn node(&self, name: &str) -> Option<&StepNode> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn outputs(&self) -> &IndexMap<String, (String, String)> {
        &self.outputs
    }

    /// Tipo de una salida de pipeline (el de la salida de nodo a la que apunta).
    pub fn output_type(&self, alias: &str) -> Option<IoType> {
        let (node, output) = self.outputs.get(alias)?;
        self.nodes.get(node)?.step.output_type(output)
    }

    /// Alias de pipeline que apunta a `node.output`, si existe.
    pub fn output_alias(&self, node: &str, output: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(_, (n, o))| n == node && o == output)
            .map(|(alias, _)| alias.as_str())
    }

    /// Aristas en orden de nodo y de binding.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for node in self.nodes.values() {
            for (input, binding) in &node.bindings {
                if let Binding::NodeOutput { node: from, output } = binding {
                    edges.push(Edge { from_node: from.clone(),
                                      from_output: output.clone(),
                                      to_node: node.name.clone(),
                                      to_input: input.clone() });
                }
            }
        }
        edges
    }

    /// Orden topológico (Kahn). A igualdad se respeta el orden de inserción.
    pub fn topological_order(&self) -> Result<Vec<&str>, GraphError> {
        let mut indegree: HashMap<&str, usize> = self.nodes.keys().map(|k| (k.as_str(), 0)).collect();
        let mut downstream: HashMap<&str, Vec<&str>> = HashMap::new();
        for node in self.nodes.values() {
            for binding in node.bindings.values() {
                if let Binding::NodeOutput { node: from, .. } = binding {
                    if let Some(d) = indegree.get_mut(node.name.as_str()) {
                        *d += 1;
                    }
                    downstream.entry(from.as_str()).or_default().push(node.name.as_str());
                }
            }
        }
        let mut ready: VecDeque<&str> = self.nodes
                                            .keys()
                                            .map(|k| k.as_str())
                                            .filter(|k| indegree.get(k) == Some(&0))
                                            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(name) = ready.pop_front() {
            order.push(name);
            for next in downstream.get(name).into_iter().flatten() {
                if let Some(d) = indegree.get_mut(next) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push_back(*next);
                    }
                }
            }
        }
        if order.len() < self.nodes.len() {
            let stuck = self.nodes
                            .keys()
                            .find(|k| !order.contains(&k.as_str()))
                            .cloned()
                            .unwrap_or_default();
            return Err(GraphError::Cycle(stuck));
        }
        Ok(order)
    }

    /// Hash estable de la definición (modelo + grafo canónico).
    pub fn definition_hash(&self) -> String {
        let graph = serde_json::to_value(self).unwrap_or_default();
        hash_value(&json!({ "model_version": MODEL_VERSION, "graph": graph }))
    }

    /// Comprueba enlaces, tipos, salidas y ausencia de ciclos.
    pub(crate) fn validate(&self) -> Result<(), GraphError> {
        for node in self.nodes.values() {
            for (input, binding) in &node.bindings {
                let expected = node.step
                                   .input_type(input)
                                   .ok_or_else(|| GraphError::UnknownInput { node: node.name.clone(),
                                                                             input: input.clone() })?;
                let found = self.binding_type(binding)?;
                if found != expected {
                    return Err(GraphError::TypeMismatch { node: node.name.clone(),
                                                          input: input.clone(),
                                                          expected,
                                                          found });
                }
            }
            if let Some(missing) = node.step.inputs().keys().find(|k| !node.bindings.contains_key(*k)) {
                return Err(GraphError::UnboundInput { node: node.name.clone(), input: missing.clone() });
            }
        }
        for (node, output) in self.outputs.values() {
            self.node_output_type(node, output)?;
        }
        self.topological_order().map(|_| ())
    }

    fn binding_type(&self, binding: &Binding) -> Result<IoType, GraphError> {
        match binding {
            Binding::PipelineInput { name } => {
                self.inputs.get(name).copied().ok_or_else(|| GraphError::UnknownPipelineInput(name.clone()))
            }
            Binding::NodeOutput { node, output } => self.node_output_type(node, output),
            Binding::Literal { .. } => Ok(IoType::String),
        }
    }

    fn node_output_type(&self, node: &str, output: &str) -> Result<IoType, GraphError> {
        self.nodes
            .get(node)
            .and_then(|n| n.step.output_type(output))
            .ok_or_else(|| GraphError::UnknownOutput { node: node.to_string(), output: output.to_string() })
    }
}
