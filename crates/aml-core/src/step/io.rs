use std::fmt;

use serde::{Deserialize, Serialize};

/// Tipo de un slot de entrada/salida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoType {
    /// Un único fichero.
    UriFile,
    /// Un directorio.
    UriFolder,
    /// Valor escalar pasado como texto.
    String,
}

impl IoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IoType::UriFile => "uri_file",
            IoType::UriFolder => "uri_folder",
            IoType::String => "string",
        }
    }

    /// Los tipos URI viajan como rutas a datos; `String` como literal.
    pub fn is_data(&self) -> bool {
        !matches!(self, IoType::String)
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
