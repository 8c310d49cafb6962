//! Construcción de ids ARM y URLs del workspace.

use crate::config::WorkspaceConfig;

const PROVIDER: &str = "Microsoft.MachineLearningServices";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceScope {
    pub endpoint: String,
    pub subscription_id: String,
    pub resource_group: String,
    pub workspace_name: String,
}

impl WorkspaceScope {
    pub fn from_config(cfg: &WorkspaceConfig) -> Self {
        Self { endpoint: cfg.endpoint.clone(),
               subscription_id: cfg.subscription_id.clone(),
               resource_group: cfg.resource_group.clone(),
               workspace_name: cfg.workspace_name.clone() }
    }

    /// `/subscriptions/{s}/resourceGroups/{rg}/providers/.../workspaces/{ws}`
    pub fn workspace_id(&self) -> String {
        format!("/subscriptions/{}/resourceGroups/{}/providers/{}/workspaces/{}",
                self.subscription_id, self.resource_group, PROVIDER, self.workspace_name)
    }

    pub fn compute_id(&self, name: &str) -> String {
        format!("{}/computes/{}", self.workspace_id(), name)
    }

    pub fn datastore_id(&self, name: &str) -> String {
        format!("{}/datastores/{}", self.workspace_id(), name)
    }

    pub fn workspace_url(&self) -> String {
        format!("{}{}", self.endpoint, self.workspace_id())
    }

    pub fn environment_versions_url(&self, name: &str) -> String {
        format!("{}/environments/{}/versions", self.workspace_url(), name)
    }

    pub fn environment_version_url(&self, name: &str, version: &str) -> String {
        format!("{}/{}", self.environment_versions_url(name), version)
    }

    pub fn compute_url(&self, name: &str) -> String {
        format!("{}/computes/{}", self.workspace_url(), name)
    }

    pub fn job_url(&self, name: &str) -> String {
        format!("{}/jobs/{}", self.workspace_url(), name)
    }

    /// Run history vive en el host regional del workspace, no en ARM.
    pub fn regional_history_endpoint(location: &str) -> String {
        format!("https://{location}.api.azureml.ms")
    }

    pub fn run_details_url(&self, history_endpoint: &str, run: &str) -> String {
        format!("{}/history/v1.0{}/runs/{}/details", history_endpoint, self.workspace_id(), run)
    }
}
