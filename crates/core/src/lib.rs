//! backend_infra_core - resource declarations for the backend services.
//!
//! Declares the API Gateway, Lambda, DynamoDB, IAM and S3 resources of the
//! auth/user/client services and synthesizes them into Terraform JSON.
//! Applying the configuration is left to `terraform`.

pub mod backend;
pub mod constructs;
pub mod environment;
pub mod error;
pub mod planning;
pub mod policies;
pub mod resources;
pub mod synth;

pub use backend::{backend_np_infra_stack, build_app, stack_name, BackendConfig, BackendStack};
pub use environment::{Environment, ParseEnvironmentError, Tier};
pub use error::{InfraError, Result};
pub use synth::{App, ResourceRef, Stack, TerraformAsset};
