//! Plantillas de comando con placeholders `${{inputs.X}}` y `${{outputs.Y}}`.
//!
//! Sólo se extraen los placeholders para validar que nombran slots
//! declarados; la sustitución la hace la capa de ejecución remota.

use serde::{Deserialize, Serialize};

const OPEN: &str = "${{";
const CLOSE: &str = "}}";

/// Placeholder encontrado dentro de la plantilla.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Input(String),
    Output(String),
    /// Cualquier otra expresión (`${{parent...}}`, sin cierre, etc.).
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(command: impl Into<String>) -> Self {
        Self(command.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholders en orden de aparición.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                found.push(Placeholder::Other(rest[start..].to_string()));
                break;
            };
            found.push(classify(after[..end].trim()));
            rest = &after[end + CLOSE.len()..];
        }
        found
    }
}

fn classify(expr: &str) -> Placeholder {
    match expr.split_once('.') {
        Some(("inputs", name)) if !name.is_empty() => Placeholder::Input(name.to_string()),
        Some(("outputs", name)) if !name.is_empty() => Placeholder::Output(name.to_string()),
        _ => Placeholder::Other(expr.to_string()),
    }
}

impl From<&str> for CommandTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CommandTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
