//! aml-steps: steps concretos del pipeline de entrenamiento del taxi.
//!
//! Este crate provee:
//! - Los cuatro steps de comando (`prep_data`, `train_model`,
//!   `evaluate_model`, `register_model`) como declaraciones estáticas.
//! - `taxi_training_pipeline`: composición fija
//!   prep → train → evaluate → register, con la arista extra prep → evaluate
//!   para los datos de test.
//! - `taxi_training_job`: enlaza los inputs del pipeline a valores concretos.
//!
//! Nota: los programas invocados (prep.py, train.py, ...) no viven en este
//! repositorio; el único contrato con ellos son los nombres de flags.

pub mod steps;
pub mod taxi;

pub use steps::TaxiSteps;
pub use taxi::{taxi_training_job, taxi_training_pipeline, TaxiJobInputs, MODEL_NAME, PIPELINE_NAME};
