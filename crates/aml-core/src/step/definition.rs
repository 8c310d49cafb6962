use indexmap::IndexMap;
use serde::Serialize;

use super::template::{CommandTemplate, Placeholder};
use super::IoType;
use crate::errors::GraphError;

/// Step de comando inmutable. Se construye con [`CommandStep::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandStep {
    name: String,
    display_name: String,
    code: String,
    command: CommandTemplate,
    environment: String,
    inputs: IndexMap<String, IoType>,
    outputs: IndexMap<String, IoType>,
}

impl CommandStep {
    pub fn builder(name: impl Into<String>) -> CommandStepBuilder {
        CommandStepBuilder::new(name)
    }

    /// Identificador estable del step (nombre del componente).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Directorio de código, relativo a la raíz del repositorio.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn command(&self) -> &CommandTemplate {
        &self.command
    }

    /// Referencia al entorno (`name@label` o `name@version`).
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn inputs(&self) -> &IndexMap<String, IoType> {
        &self.inputs
    }

    pub fn outputs(&self) -> &IndexMap<String, IoType> {
        &self.outputs
    }

    pub fn input_type(&self, name: &str) -> Option<IoType> {
        self.inputs.get(name).copied()
    }

    pub fn output_type(&self, name: &str) -> Option<IoType> {
        self.outputs.get(name).copied()
    }
}

/// Builder de [`CommandStep`]. Los slots duplicados se detectan en `build`.
#[derive(Debug, Clone)]
pub struct CommandStepBuilder {
    name: String,
    display_name: Option<String>,
    code: String,
    command: CommandTemplate,
    environment: String,
    inputs: Vec<(String, IoType)>,
    outputs: Vec<(String, IoType)>,
}

impl CommandStepBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               display_name: None,
               code: String::new(),
               command: CommandTemplate::new(""),
               environment: String::new(),
               inputs: Vec::new(),
               outputs: Vec::new() }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn command(mut self, command: impl Into<CommandTemplate>) -> Self {
        self.command = command.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn input(mut self, name: impl Into<String>, io_type: IoType) -> Self {
        self.inputs.push((name.into(), io_type));
        self
    }

    pub fn output(mut self, name: impl Into<String>, io_type: IoType) -> Self {
        self.outputs.push((name.into(), io_type));
        self
    }

    /// Valida slots únicos y que cada placeholder nombre un slot declarado.
    pub fn build(self) -> Result<CommandStep, GraphError> {
        let inputs = collect_slots(&self.name, self.inputs)?;
        let outputs = collect_slots(&self.name, self.outputs)?;
        for placeholder in self.command.placeholders() {
            let known = match &placeholder {
                Placeholder::Input(n) => inputs.contains_key(n),
                Placeholder::Output(n) => outputs.contains_key(n),
                Placeholder::Other(_) => false,
            };
            if !known {
                let text = match placeholder {
                    Placeholder::Input(n) => format!("inputs.{n}"),
                    Placeholder::Output(n) => format!("outputs.{n}"),
                    Placeholder::Other(e) => e,
                };
                return Err(GraphError::UnknownPlaceholder { step: self.name, placeholder: text });
            }
        }
        let display_name = self.display_name.unwrap_or_else(|| self.name.clone());
        Ok(CommandStep { name: self.name,
                         display_name,
                         code: self.code,
                         command: self.command,
                         environment: self.environment,
                         inputs,
                         outputs })
    }
}

fn collect_slots(step: &str, slots: Vec<(String, IoType)>) -> Result<IndexMap<String, IoType>, GraphError> {
    let mut map = IndexMap::with_capacity(slots.len());
    for (name, io_type) in slots {
        if map.insert(name.clone(), io_type).is_some() {
            return Err(GraphError::DuplicateSlot { step: step.to_string(), slot: name });
        }
    }
    Ok(map)
}
