//! Procedimiento principal: resolver referencias, construir el job,
//! enviarlo y seguirlo hasta que termine.

use std::io::Write;
use std::time::Duration;

use aml_client::{stream_job, ControlPlane};
use aml_core::constants::{DEFAULT_DATASTORE, LATEST_LABEL};
use aml_core::{data_asset_path, environment_lookup_name, latest_reference, AssetRef, PipelineJob, SubmittedJob};
use aml_steps::{taxi_training_job, TaxiJobInputs, TaxiSteps};
use log::info;

use crate::cli::Args;
use crate::errors::AppError;

/// Resuelve entorno y compute contra el control plane y construye el job
/// con sus settings. No envía nada.
///
/// Las referencias sin nombre (`@3`, vacías) se rechazan antes de consultar
/// el control plane.
pub fn prepare<C: ControlPlane + ?Sized>(args: &Args, client: &C) -> Result<PipelineJob, AppError> {
    let requested_env = AssetRef::parse(&args.environment_name)?;
    AssetRef::parse(&args.data_name)?;

    // Sólo el nombre sin versión se consulta; todos los steps usan `<name>@latest`.
    if requested_env.is_pinned() {
        info!("environment {} requested, resolving label {LATEST_LABEL} instead", requested_env);
    }
    let lookup = environment_lookup_name(&args.environment_name);
    let env = client.get_environment(lookup, LATEST_LABEL)?;
    info!("environment {} resolved to version {}", env.name, env.version);
    let env_ref = latest_reference(&env.name);
    info!("environment reference: {env_ref}");

    let compute = client.get_compute(&args.compute_name)?;
    info!("compute {} type {}", compute.name, compute.compute_type);

    let raw_data = data_asset_path(&args.data_name);
    info!("data asset path: {raw_data}");
    info!("experiment: {}", args.experiment_name);
    let steps = TaxiSteps::with_environment(&env_ref)?;
    let mut job = taxi_training_job(&steps,
                                    &args.experiment_name,
                                    TaxiJobInputs { raw_data,
                                                    enable_monitoring: args.enable_monitoring.clone(),
                                                    table_name: args.table_name.clone() })?;
    job.settings.default_compute = Some(args.compute_name.clone());
    job.settings.default_datastore = Some(DEFAULT_DATASTORE.to_string());
    job.tag("environment_version", format!("{}:{}", env.name, env.version));
    Ok(job)
}

/// Envía el job y bloquea hasta un estado terminal.
pub fn run<C, W>(args: &Args, client: &C, poll_interval: Duration, out: &mut W) -> Result<SubmittedJob, AppError>
    where C: ControlPlane + ?Sized,
          W: Write
{
    let job = prepare(args, client)?;
    let submitted = client.create_or_update_job(&job)?;
    writeln!(out, "Submitted job: {}", submitted.name)?;
    if let Some(url) = &submitted.studio_url {
        writeln!(out, "Studio URL: {url}")?;
    }
    Ok(stream_job(client, &submitted.name, poll_interval, out)?)
}
