//! Seam con el control plane remoto.
//!
//! Todas las operaciones son síncronas y bloqueantes. Las implementaciones
//! no reintentan: cualquier fallo remoto se devuelve tal cual.

use std::collections::BTreeMap;

use aml_core::{PipelineJob, SubmittedJob};

/// Versión concreta de un entorno registrado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVersion {
    pub name: String,
    pub version: String,
}

/// Compute registrado. El tipo sólo se informa, no altera el envío.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeResource {
    pub name: String,
    pub compute_type: String,
}

pub trait ControlPlane {
    /// Resuelve un entorno por nombre y etiqueta (`latest`) o versión.
    fn get_environment(&self, name: &str, label: &str) -> Result<EnvironmentVersion, crate::ClientError>;

    /// Valida que el compute exista.
    fn get_compute(&self, name: &str) -> Result<ComputeResource, crate::ClientError>;

    /// Envía (crea o reemplaza) el job de pipeline.
    fn create_or_update_job(&self, job: &PipelineJob) -> Result<SubmittedJob, crate::ClientError>;

    /// Estado actual del job.
    fn get_job(&self, name: &str) -> Result<SubmittedJob, crate::ClientError>;

    /// Contenido completo de cada fichero de log disponible (nombre -> texto).
    fn job_logs(&self, name: &str) -> Result<BTreeMap<String, String>, crate::ClientError>;
}

impl<T: ControlPlane + ?Sized> ControlPlane for &T {
    fn get_environment(&self, name: &str, label: &str) -> Result<EnvironmentVersion, crate::ClientError> {
        (**self).get_environment(name, label)
    }

    fn get_compute(&self, name: &str) -> Result<ComputeResource, crate::ClientError> {
        (**self).get_compute(name)
    }

    fn create_or_update_job(&self, job: &PipelineJob) -> Result<SubmittedJob, crate::ClientError> {
        (**self).create_or_update_job(job)
    }

    fn get_job(&self, name: &str) -> Result<SubmittedJob, crate::ClientError> {
        (**self).get_job(name)
    }

    fn job_logs(&self, name: &str) -> Result<BTreeMap<String, String>, crate::ClientError> {
        (**self).job_logs(name)
    }
}
