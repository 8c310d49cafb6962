//! Errores del cliente del control plane.
//! No hay recuperación local: todos se propagan hasta `main`.

use aml_core::{GraphError, JobStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: set one of {0}")]
    Missing(String),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
    #[error("cannot load env file: {0}")]
    EnvFile(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no credential available: {0}")]
    CredentialUnavailable(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },
    #[error("request rejected with status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("job {name} finished with status {status}")]
    JobFailed { name: String, status: JobStatus },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Traduce un error de ureq; `kind`/`name` dan contexto a los 404.
    pub(crate) fn from_ureq(err: ureq::Error, kind: &'static str, name: &str) -> Self {
        match err {
            ureq::Error::Status(404, _) => ClientError::NotFound { kind, name: name.to_string() },
            ureq::Error::Status(status @ (401 | 403), resp) => {
                let body = resp.into_string().unwrap_or_default();
                ClientError::Authentication(format!("status {status}: {body}"))
            }
            ureq::Error::Status(status, resp) => ClientError::Http { status,
                                                                     body: resp.into_string().unwrap_or_default() },
            ureq::Error::Transport(t) => ClientError::Transport(t.to_string()),
        }
    }
}
