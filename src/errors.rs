use aml_client::{ClientError, ConfigError};
use aml_core::GraphError;
use thiserror::Error;

/// Errores de la aplicación. Ninguno se recupera localmente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error del pipeline: {0}")]
    Graph(#[from] GraphError),
    #[error("Error del control plane: {0}")]
    Client(#[from] ClientError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}
