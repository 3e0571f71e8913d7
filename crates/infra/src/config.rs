use std::{env, path::PathBuf};

use backend_infra_core::backend::{DEFAULT_ARTIFACT, DEFAULT_RUNTIME, DEFAULT_VERSION};
use backend_infra_core::resources::DEFAULT_REGION;
use backend_infra_core::BackendConfig;

use crate::cli::Global;

/// Stack configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Provider access key, written into the provider block when set.
    pub access_key: Option<String>,
    /// Provider secret key, written into the provider block when set.
    pub secret_key: Option<String>,
    /// Lambda deployment package (default: "assets/StarterLambda.zip")
    pub artifact: PathBuf,
    /// Lambda runtime (default: "nodejs16.x")
    pub runtime: String,
    /// Version tag of the deployed services (default: "0.0")
    pub version: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `ACCESS_KEY` - provider access key (optional)
    /// - `SECRET_KEY` - provider secret key (optional)
    /// - `LAMBDA_ARTIFACT` - deployment package path (default: "assets/StarterLambda.zip")
    /// - `LAMBDA_RUNTIME` - Lambda runtime (default: "nodejs16.x")
    /// - `SERVICE_VERSION` - version tag (default: "0.0")
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            region: non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key: non_empty("ACCESS_KEY"),
            secret_key: non_empty("SECRET_KEY"),
            artifact: non_empty("LAMBDA_ARTIFACT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT)),
            runtime: non_empty("LAMBDA_RUNTIME").unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
            version: non_empty("SERVICE_VERSION").unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }
    }

    /// Applies command line flags on top of the environment.
    pub fn with_overrides(mut self, global: &Global) -> Self {
        if let Some(region) = &global.region {
            self.region = region.clone();
        }
        if let Some(artifact) = &global.artifact {
            self.artifact = artifact.clone();
        }
        if let Some(runtime) = &global.runtime {
            self.runtime = runtime.clone();
        }
        if let Some(version) = &global.service_version {
            self.version = version.clone();
        }
        self
    }

    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            region: self.region.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            artifact: self.artifact.clone(),
            runtime: self.runtime.clone(),
            version: self.version.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
