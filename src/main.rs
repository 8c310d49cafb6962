use std::io;

use aml_client::{init_dotenv, DefaultCredential, RestControlPlane, WorkspaceConfig};
use amlflow::{run, AppError, Args};
use clap::Parser;
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    init_dotenv();

    let args = Args::parse();
    println!("{args:#?}");

    if let Err(e) = submit(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn submit(args: &Args) -> Result<(), AppError> {
    let cfg = WorkspaceConfig::from_env()?;
    info!("workspace {} (subscription {}, resource group {})",
          cfg.workspace_name, cfg.subscription_id, cfg.resource_group);
    let client = RestControlPlane::new(&cfg, DefaultCredential::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(args, &client, cfg.poll_interval, &mut out)?;
    Ok(())
}
