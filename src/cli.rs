use clap::Parser;

/// Argumentos de línea de comandos. Los nombres de flag conservan el
/// guion bajo (`--experiment_name`, ...).
#[derive(Debug, Clone, Parser)]
#[command(name = "amlflow")]
#[command(about = "Submit the taxi training pipeline to an Azure ML workspace")]
pub struct Args {
    #[arg(long = "experiment_name", help = "Experiment name")]
    pub experiment_name: String,

    #[arg(long = "compute_name", help = "Compute target name")]
    pub compute_name: String,

    #[arg(long = "data_name", help = "Data asset name, optionally name@version")]
    pub data_name: String,

    #[arg(long = "environment_name", help = "Environment name, optionally name@version")]
    pub environment_name: String,

    #[arg(long = "enable_monitoring", default_value = "false", help = "Enable data monitoring in prep")]
    pub enable_monitoring: String,

    #[arg(long = "table_name", default_value = "taximonitoring", help = "Monitoring table name")]
    pub table_name: String,
}
