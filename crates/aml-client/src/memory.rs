//! Control plane en memoria.
//!
//! Registra entornos y computes, guarda los jobs enviados y reproduce una
//! secuencia de estados/logs por cada consulta. El último estado guionizado
//! se mantiene una vez agotada la secuencia.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};

use aml_core::constants::LATEST_LABEL;
use aml_core::{JobStatus, PipelineJob, SubmittedJob};

use crate::control_plane::{ComputeResource, ControlPlane, EnvironmentVersion};
use crate::error::ClientError;

#[derive(Debug, Default)]
pub struct InMemoryControlPlane {
    environments: HashMap<String, Vec<String>>,
    computes: HashMap<String, String>,
    studio_base: Option<String>,
    submitted: RefCell<Vec<PipelineJob>>,
    statuses: RefCell<VecDeque<JobStatus>>,
    current: RefCell<HashMap<String, JobStatus>>,
    log_snapshots: RefCell<VecDeque<BTreeMap<String, String>>>,
    last_logs: RefCell<BTreeMap<String, String>>,
}

impl InMemoryControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una versión; la última registrada es `latest`.
    pub fn with_environment(mut self, name: &str, version: &str) -> Self {
        self.environments.entry(name.to_string()).or_default().push(version.to_string());
        self
    }

    pub fn with_compute(mut self, name: &str, compute_type: &str) -> Self {
        self.computes.insert(name.to_string(), compute_type.to_string());
        self
    }

    /// Base de la URL de studio devuelta al aceptar un job (`<base>/<job>`).
    pub fn with_studio_base(mut self, base: &str) -> Self {
        self.studio_base = Some(base.trim_end_matches('/').to_string());
        self
    }

    /// Estados devueltos por `get_job` en orden.
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.statuses.borrow_mut().extend(statuses);
        self
    }

    /// Snapshot completo de logs devuelto en cada llamada a `job_logs`.
    pub fn with_log_snapshot(self, snapshot: &[(&str, &str)]) -> Self {
        let map = snapshot.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.log_snapshots.borrow_mut().push_back(map);
        self
    }

    /// Jobs recibidos por `create_or_update_job`.
    pub fn submitted(&self) -> Vec<PipelineJob> {
        self.submitted.borrow().clone()
    }

    fn studio_url(&self, name: &str) -> Option<String> {
        self.studio_base.as_ref().map(|b| format!("{b}/{name}"))
    }
}

impl ControlPlane for InMemoryControlPlane {
    fn get_environment(&self, name: &str, label: &str) -> Result<EnvironmentVersion, ClientError> {
        let not_found = || ClientError::NotFound { kind: "environment", name: format!("{name}@{label}") };
        let versions = self.environments.get(name).ok_or_else(not_found)?;
        let version = if label == LATEST_LABEL {
            versions.last()
        } else {
            versions.iter().find(|v| v.as_str() == label)
        };
        version.map(|v| EnvironmentVersion { name: name.to_string(), version: v.clone() })
               .ok_or_else(not_found)
    }

    fn get_compute(&self, name: &str) -> Result<ComputeResource, ClientError> {
        self.computes
            .get(name)
            .map(|t| ComputeResource { name: name.to_string(), compute_type: t.clone() })
            .ok_or_else(|| ClientError::NotFound { kind: "compute", name: name.to_string() })
    }

    fn create_or_update_job(&self, job: &PipelineJob) -> Result<SubmittedJob, ClientError> {
        job.validate()?;
        self.submitted.borrow_mut().push(job.clone());
        self.current.borrow_mut().insert(job.name().to_string(), JobStatus::NotStarted);
        Ok(SubmittedJob { name: job.name().to_string(),
                          experiment_name: Some(job.experiment_name().to_string()),
                          studio_url: self.studio_url(job.name()),
                          status: JobStatus::NotStarted })
    }

    fn get_job(&self, name: &str) -> Result<SubmittedJob, ClientError> {
        let mut current = self.current.borrow_mut();
        let status = current.get_mut(name)
                            .ok_or_else(|| ClientError::NotFound { kind: "job", name: name.to_string() })?;
        if let Some(next) = self.statuses.borrow_mut().pop_front() {
            *status = next;
        }
        let experiment_name = self.submitted
                                  .borrow()
                                  .iter()
                                  .find(|j| j.name() == name)
                                  .map(|j| j.experiment_name().to_string());
        Ok(SubmittedJob { name: name.to_string(),
                          experiment_name,
                          studio_url: self.studio_url(name),
                          status: *status })
    }

    fn job_logs(&self, name: &str) -> Result<BTreeMap<String, String>, ClientError> {
        if !self.current.borrow().contains_key(name) {
            return Err(ClientError::NotFound { kind: "job", name: name.to_string() });
        }
        let mut last = self.last_logs.borrow_mut();
        if let Some(next) = self.log_snapshots.borrow_mut().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_last_registered_version() {
        let cp = InMemoryControlPlane::new().with_environment("env", "1").with_environment("env", "4");
        assert_eq!(cp.get_environment("env", "latest").unwrap().version, "4");
        assert_eq!(cp.get_environment("env", "1").unwrap().version, "1");
        assert!(matches!(cp.get_environment("env", "9"), Err(ClientError::NotFound { kind: "environment", .. })));
        assert!(matches!(cp.get_environment("other", "latest"), Err(ClientError::NotFound { .. })));
    }

    #[test]
    fn unknown_compute_is_not_found() {
        let cp = InMemoryControlPlane::new().with_compute("cpu", "AmlCompute");
        assert_eq!(cp.get_compute("cpu").unwrap().compute_type, "AmlCompute");
        assert!(matches!(cp.get_compute("gpu"), Err(ClientError::NotFound { kind: "compute", .. })));
    }

    #[test]
    fn unknown_job_is_not_found() {
        let cp = InMemoryControlPlane::new();
        assert!(matches!(cp.get_job("x"), Err(ClientError::NotFound { kind: "job", .. })));
        assert!(cp.job_logs("x").is_err());
    }
}
