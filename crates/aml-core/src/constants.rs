//! Constantes compartidas del modelo.
//!
//! `MODEL_VERSION` forma parte del input del `definition_hash`: un cambio
//! incompatible en la forma del grafo debe invalidar los hashes anteriores
//! aunque los steps no cambien.

/// Versión lógica del modelo de pipeline.
pub const MODEL_VERSION: &str = "P1.0";

/// Etiqueta que el control plane resuelve a la última versión registrada.
pub const LATEST_LABEL: &str = "latest";

/// Separador entre nombre y versión en las referencias `name@version`.
pub const VERSION_SEPARATOR: char = '@';

/// Datastore por defecto del workspace.
pub const DEFAULT_DATASTORE: &str = "workspaceblobstore";
