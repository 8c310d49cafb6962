//! aml-core: modelo neutral de pipelines para el control plane de ML.
//!
//! El crate no habla con ningún servicio remoto. Describe:
//! - Referencias a recursos (`reference`): entorno, datos, versiones.
//! - Steps de tipo comando (`step`) con entradas/salidas tipadas.
//! - El grafo del pipeline (`pipeline`) y su validación como DAG.
//! - El job listo para enviar (`job`) con inputs enlazados y settings.
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod job;
pub mod pipeline;
pub mod reference;
pub mod step;

pub use errors::GraphError;
pub use job::{JobInput, JobSettings, JobStatus, PipelineJob, SubmittedJob};
pub use pipeline::{Binding, Edge, NodeHandle, OutputHandle, PipelineBuilder, PipelineGraph, StepNode};
pub use reference::{data_asset_path, environment_lookup_name, latest_reference, AssetRef};
pub use step::{CommandStep, CommandStepBuilder, CommandTemplate, IoType, Placeholder};
