//! aml-client: acceso al control plane de ML.
//!
//! - `ControlPlane`: seam neutral (resolver entorno/compute, enviar job,
//!   consultar estado y logs).
//! - `InMemoryControlPlane`: implementación en memoria para tests.
//! - `RestControlPlane`: implementación HTTPS (ARM + run history).
//! - `credential`: obtención de bearer tokens.
//! - `config`: workspace desde `.env` + variables de entorno.
//! - `stream`: seguimiento bloqueante de un job hasta estado terminal.

pub mod config;
pub mod control_plane;
pub mod credential;
pub mod error;
pub mod memory;
pub mod rest;
pub mod stream;

pub use config::{init_dotenv, load_env_file, WorkspaceConfig};
pub use control_plane::{ComputeResource, ControlPlane, EnvironmentVersion};
pub use credential::{AccessToken, AzureCliCredential, ClientSecretCredential, DefaultCredential, TokenCredential};
pub use error::{ClientError, ConfigError};
pub use memory::InMemoryControlPlane;
pub use rest::{RestControlPlane, WorkspaceScope};
pub use stream::stream_job;
