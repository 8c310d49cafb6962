//! Configuración del workspace desde variables de entorno.
//!
//! Se carga un `.env` opcional una sola vez antes de leer el entorno del
//! proceso. Las variables ya definidas en el proceso no se sobrescriben.
//! Para cada valor se aceptan dos nombres; el primero tiene prioridad y los
//! valores vacíos cuentan como no definidos.

use std::env;
use std::path::Path;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::ConfigError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const SUBSCRIPTION_KEYS: [&str; 2] = ["AZURE_SUBSCRIPTION_ID", "subscription_id"];
pub const RESOURCE_GROUP_KEYS: [&str; 2] = ["AZURE_RESOURCE_GROUP", "resource_group"];
pub const WORKSPACE_KEYS: [&str; 2] = ["AZURE_ML_WORKSPACE", "workspace_name"];

pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2024-04-01";
pub const DEFAULT_POLL_SECONDS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub subscription_id: String,
    pub resource_group: String,
    pub workspace_name: String,
    /// Endpoint de Resource Manager.
    pub endpoint: String,
    pub api_version: String,
    /// Intervalo entre consultas de estado durante el streaming.
    pub poll_interval: Duration,
    /// Base de run history. Sin valor se usa el host regional del workspace.
    pub history_endpoint: Option<String>,
}

impl WorkspaceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Variante pura: `lookup` resuelve un nombre de variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let subscription_id = required(&lookup, &SUBSCRIPTION_KEYS)?;
        let resource_group = required(&lookup, &RESOURCE_GROUP_KEYS)?;
        let workspace_name = required(&lookup, &WORKSPACE_KEYS)?;
        let endpoint = first_of(&lookup, &["AZURE_RESOURCE_MANAGER_ENDPOINT"]).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let api_version = first_of(&lookup, &["AMLFLOW_API_VERSION"]).unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let poll_seconds = match first_of(&lookup, &["AMLFLOW_POLL_SECONDS"]) {
            // 0 dejaría el streaming consultando sin pausa.
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Invalid { key: "AMLFLOW_POLL_SECONDS".into(), value: raw }),
            },
            None => DEFAULT_POLL_SECONDS,
        };
        let history_endpoint = first_of(&lookup, &["AMLFLOW_HISTORY_ENDPOINT"]).map(|e| e.trim_end_matches('/').to_string());
        Ok(Self { subscription_id,
                  resource_group,
                  workspace_name,
                  endpoint: endpoint.trim_end_matches('/').to_string(),
                  api_version,
                  poll_interval: Duration::from_secs(poll_seconds),
                  history_endpoint })
    }
}

fn first_of<F>(lookup: &F, keys: &[&str]) -> Option<String>
    where F: Fn(&str) -> Option<String>
{
    keys.iter().filter_map(|k| lookup(*k)).find(|v| !v.is_empty())
}

fn required<F>(lookup: &F, keys: &[&str]) -> Result<String, ConfigError>
    where F: Fn(&str) -> Option<String>
{
    first_of(lookup, keys).ok_or_else(|| ConfigError::Missing(keys.join(" or ")))
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

/// Carga un archivo de entorno concreto (sin sobrescribir variables existentes).
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile(format!("{}: {e}", path.display())))
}
