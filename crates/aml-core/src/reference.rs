//! Referencias textuales a recursos registrados (`name` o `name@version`).
//!
//! El control plane acepta la etiqueta `latest` en lugar de una versión
//! concreta. Los entornos siempre se referencian como `<name>@latest` para no
//! volver a registrar la definición; los data assets sólo reciben `@latest`
//! cuando el usuario no fijó una versión.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{LATEST_LABEL, VERSION_SEPARATOR};
use crate::errors::GraphError;

/// Referencia `name[@version]` ya separada.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub name: String,
    pub version: Option<String>,
}

impl AssetRef {
    /// Separa en el primer `@`. El nombre no puede quedar vacío.
    pub fn parse(input: &str) -> Result<Self, GraphError> {
        let (name, version) = match input.split_once(VERSION_SEPARATOR) {
            Some((n, v)) => (n, Some(v.to_string())),
            None => (input, None),
        };
        if name.trim().is_empty() {
            return Err(GraphError::InvalidReference(format!("'{input}' has an empty name")));
        }
        Ok(Self { name: name.to_string(), version })
    }

    pub fn latest(name: impl Into<String>) -> Self {
        Self { name: name.into(), version: Some(LATEST_LABEL.to_string()) }
    }

    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}{}{}", self.name, VERSION_SEPARATOR, v),
            None => f.write_str(&self.name),
        }
    }
}

/// Nombre usado para buscar el entorno: lo que precede al primer `@`.
pub fn environment_lookup_name(input: &str) -> &str {
    input.split_once(VERSION_SEPARATOR).map_or(input, |(name, _)| name)
}

/// `"<name>@latest"`.
pub fn latest_reference(name: &str) -> String {
    AssetRef::latest(name).to_string()
}

/// Ruta del data asset: sin cambios si ya trae `@`, si no `@latest`.
pub fn data_asset_path(name: &str) -> String {
    if name.contains(VERSION_SEPARATOR) {
        name.to_string()
    } else {
        latest_reference(name)
    }
}
