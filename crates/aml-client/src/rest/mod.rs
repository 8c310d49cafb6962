//! Implementación HTTPS del control plane.
//!
//! - Recursos del workspace (entornos, computes, jobs) vía Resource Manager.
//! - Logs vía run history, en el host regional del workspace. La región se
//!   consulta una vez y se cachea. `history_endpoint` en la configuración
//!   reemplaza ese host.
//!
//! Sin reintentos ni timeouts de lectura: un fallo remoto se propaga.

mod paths;
pub mod wire;

use std::collections::BTreeMap;
use std::io::Read;

use aml_core::constants::LATEST_LABEL;
use aml_core::{PipelineJob, SubmittedJob};
use log::{debug, warn};
use once_cell::unsync::OnceCell;
use serde::de::DeserializeOwned;

use crate::config::WorkspaceConfig;
use crate::control_plane::{ComputeResource, ControlPlane, EnvironmentVersion};
use crate::credential::{TokenCredential, MANAGEMENT_SCOPE};
use crate::error::ClientError;

pub use paths::WorkspaceScope;

pub struct RestControlPlane<C: TokenCredential> {
    agent: ureq::Agent,
    credential: C,
    scope: WorkspaceScope,
    api_version: String,
    history_endpoint: OnceCell<String>,
}

impl<C: TokenCredential> RestControlPlane<C> {
    pub fn new(config: &WorkspaceConfig, credential: C) -> Self {
        Self { agent: ureq::AgentBuilder::new().build(),
               credential,
               scope: WorkspaceScope::from_config(config),
               api_version: config.api_version.clone(),
               history_endpoint: config.history_endpoint.clone().map(OnceCell::with_value).unwrap_or_default() }
    }

    pub fn scope(&self) -> &WorkspaceScope {
        &self.scope
    }

    fn bearer(&self) -> Result<String, ClientError> {
        let token = self.credential.get_token(MANAGEMENT_SCOPE)?;
        Ok(format!("Bearer {}", token.token))
    }

    fn read_json<T: DeserializeOwned>(resp: ureq::Response, what: &str) -> Result<T, ClientError> {
        resp.into_json::<T>().map_err(|e| ClientError::InvalidResponse(format!("{what}: {e}")))
    }

    /// GET autenticado contra ARM con `api-version`.
    fn arm_get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)], kind: &'static str, name: &str) -> Result<T, ClientError> {
        debug!("GET {url}");
        let mut req = self.agent
                          .get(url)
                          .set("Authorization", &self.bearer()?)
                          .query("api-version", &self.api_version);
        for (k, v) in query {
            req = req.query(k, v);
        }
        let resp = req.call().map_err(|e| ClientError::from_ureq(e, kind, name))?;
        Self::read_json(resp, kind)
    }

    /// Base de run history; sin override se deriva de la región del workspace.
    fn history_endpoint(&self) -> Result<&str, ClientError> {
        self.history_endpoint
            .get_or_try_init(|| {
                let ws: wire::WorkspaceResource =
                    self.arm_get(&self.scope.workspace_url(), &[], "workspace", &self.scope.workspace_name)?;
                Ok(WorkspaceScope::regional_history_endpoint(&ws.location.to_lowercase().replace(' ', "")))
            })
            .map(|base| base.as_str())
    }

    /// Lee un log completo sin el límite de tamaño de `into_string`.
    fn read_log(&self, sas_url: &str) -> Result<String, String> {
        let resp = self.agent.get(sas_url).call().map_err(|e| e.to_string())?;
        let mut content = String::new();
        resp.into_reader().read_to_string(&mut content).map_err(|e| e.to_string())?;
        Ok(content)
    }
}

impl<C: TokenCredential> ControlPlane for RestControlPlane<C> {
    fn get_environment(&self, name: &str, label: &str) -> Result<EnvironmentVersion, ClientError> {
        let reference = format!("{name}@{label}");
        if label != LATEST_LABEL {
            let v: wire::EnvironmentVersionResource =
                self.arm_get(&self.scope.environment_version_url(name, label), &[], "environment", &reference)?;
            return Ok(EnvironmentVersion { name: name.to_string(), version: v.name });
        }
        let list: wire::ResourceList<wire::EnvironmentVersionResource> =
            self.arm_get(&self.scope.environment_versions_url(name),
                         &[("$orderBy", "createdtime desc"), ("$top", "1")],
                         "environment",
                         &reference)?;
        list.value
            .into_iter()
            .next()
            .map(|v| EnvironmentVersion { name: name.to_string(), version: v.name })
            .ok_or(ClientError::NotFound { kind: "environment", name: reference })
    }

    fn get_compute(&self, name: &str) -> Result<ComputeResource, ClientError> {
        let c: wire::ComputeResourceWire = self.arm_get(&self.scope.compute_url(name), &[], "compute", name)?;
        Ok(ComputeResource { name: c.name,
                             compute_type: c.properties.compute_type.unwrap_or_else(|| "unknown".to_string()) })
    }

    fn create_or_update_job(&self, job: &PipelineJob) -> Result<SubmittedJob, ClientError> {
        job.validate()?;
        let url = self.scope.job_url(job.name());
        let body = wire::encode_pipeline_job(job, &self.scope);
        debug!("PUT {url}");
        let resp = self.agent
                       .put(&url)
                       .set("Authorization", &self.bearer()?)
                       .query("api-version", &self.api_version)
                       .send_json(body)
                       .map_err(|e| ClientError::from_ureq(e, "job", job.name()))?;
        let created: wire::JobResource = Self::read_json(resp, "job")?;
        Ok(created.into_submitted())
    }

    fn get_job(&self, name: &str) -> Result<SubmittedJob, ClientError> {
        let j: wire::JobResource = self.arm_get(&self.scope.job_url(name), &[], "job", name)?;
        Ok(j.into_submitted())
    }

    fn job_logs(&self, name: &str) -> Result<BTreeMap<String, String>, ClientError> {
        let url = self.scope.run_details_url(self.history_endpoint()?, name);
        debug!("GET {url}");
        let details: wire::RunDetails = match self.agent.get(&url).set("Authorization", &self.bearer()?).call() {
            Ok(resp) => Self::read_json(resp, "run details")?,
            // El run aún no existe en run history mientras el job se prepara.
            Err(ureq::Error::Status(404, _)) => return Ok(BTreeMap::new()),
            Err(e) => return Err(ClientError::from_ureq(e, "run", name)),
        };
        let mut logs = BTreeMap::new();
        for (file, sas_url) in details.log_files {
            match self.read_log(&sas_url) {
                Ok(content) => {
                    logs.insert(file, content);
                }
                Err(e) => warn!("log {file} not readable yet: {e}"),
            }
        }
        Ok(logs)
    }
}
