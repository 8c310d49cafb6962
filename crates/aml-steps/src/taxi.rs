//! Composición del pipeline de entrenamiento.
//!
//! Forma fija (4 nodos, 5 aristas de datos):
//!
//! ```text
//! prep ──train_data──▶ train ──model_output──▶ evaluate ──evaluation_output──▶ register
//!   └────────test_data────────────────────────▶ evaluate
//!                      train ──model_output──────────────────────────────────▶ register
//! ```

use aml_core::{Binding, GraphError, IoType, JobInput, PipelineBuilder, PipelineGraph, PipelineJob};
use log::debug;

use crate::steps::TaxiSteps;

pub const PIPELINE_NAME: &str = "taxi_training_pipeline";

/// Nombre de modelo fijo que reciben evaluate y register.
pub const MODEL_NAME: &str = "taxi-model";

/// Construye el grafo. No ejecuta nada.
///
/// Inputs del pipeline: `raw_data` (uri_file), `enable_monitoring` y
/// `table_name` (string). Salidas: `pipeline_job_train_data`,
/// `pipeline_job_test_data`, `pipeline_job_trained_model`,
/// `pipeline_job_score_report`.
pub fn taxi_training_pipeline(steps: &TaxiSteps) -> Result<PipelineGraph, GraphError> {
    let mut b = PipelineBuilder::new(PIPELINE_NAME);
    let raw_data = b.input("raw_data", IoType::UriFile)?;
    let enable_monitoring = b.input("enable_monitoring", IoType::String)?;
    let table_name = b.input("table_name", IoType::String)?;

    let prep = b.add_node("prep",
                          &steps.prep,
                          [("raw_data", raw_data), ("enable_monitoring", enable_monitoring), ("table_name", table_name)])?;
    let train = b.add_node("train", &steps.train, [("train_data", prep.output("train_data")?)])?;
    let evaluate = b.add_node("evaluate",
                              &steps.evaluate,
                              [("model_name", Binding::literal(MODEL_NAME)),
                               ("model_input", train.output("model_output")?.into()),
                               ("test_data", prep.output("test_data")?.into())])?;
    b.add_node("register",
               &steps.register,
               [("model_name", Binding::literal(MODEL_NAME)),
                ("model_path", train.output("model_output")?.into()),
                ("evaluation_output", evaluate.output("evaluation_output")?.into())])?;

    b.output("pipeline_job_train_data", prep.output("train_data")?)?;
    b.output("pipeline_job_test_data", prep.output("test_data")?)?;
    b.output("pipeline_job_trained_model", train.output("model_output")?)?;
    b.output("pipeline_job_score_report", evaluate.output("evaluation_output")?)?;

    let graph = b.build()?;
    debug!("pipeline {} definition hash {}", graph.name(), graph.definition_hash());
    Ok(graph)
}

/// Valores concretos para los tres inputs del pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxiJobInputs {
    /// Referencia versionada al data asset (`name@version`).
    pub raw_data: String,
    pub enable_monitoring: String,
    pub table_name: String,
}

/// Grafo + inputs enlazados, listo para fijar settings y enviar.
pub fn taxi_training_job(steps: &TaxiSteps, experiment_name: &str, inputs: TaxiJobInputs) -> Result<PipelineJob, GraphError> {
    let graph = taxi_training_pipeline(steps)?;
    let mut job = PipelineJob::new(graph, experiment_name);
    job.bind("raw_data", JobInput::asset(IoType::UriFile, inputs.raw_data))?;
    job.bind("enable_monitoring", JobInput::literal(inputs.enable_monitoring))?;
    job.bind("table_name", JobInput::literal(inputs.table_name))?;
    job.validate()?;
    Ok(job)
}
