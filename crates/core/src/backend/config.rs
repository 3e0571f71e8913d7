//! Settings shared by every backend stack (Functional Core - pure data).

use std::path::PathBuf;

use crate::resources::DEFAULT_REGION;

pub const DEFAULT_ARTIFACT: &str = "assets/StarterLambda.zip";
pub const DEFAULT_RUNTIME: &str = "nodejs16.x";
pub const DEFAULT_VERSION: &str = "0.0";

/// Inputs of [`backend_np_infra_stack`](super::backend_np_infra_stack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Deployment package shared by every service.
    pub artifact: PathBuf,
    pub runtime: String,
    pub version: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key: None,
            secret_key: None,
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
            runtime: DEFAULT_RUNTIME.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl BackendConfig {
    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = artifact.into();
        self
    }
}
