//! amlflow
//!
//! Envía el pipeline de entrenamiento del taxi a un workspace de Azure ML:
//! - `cli` define los argumentos.
//! - `app` resuelve referencias, construye el job, lo envía y hace streaming.
//! - `errors` agrupa los errores de los crates del workspace.

pub mod app;
pub mod cli;
pub mod errors;

pub use app::{prepare, run};
pub use cli::Args;
pub use errors::AppError;
