use serde::Serialize;

use crate::synth::TerraformProvider;

/// Default region for every stack.
pub const DEFAULT_REGION: &str = "us-east-1";

/// The `aws` provider block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwsProvider {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl TerraformProvider for AwsProvider {
    const PROVIDER_NAME: &'static str = "aws";
    const SOURCE: &'static str = "hashicorp/aws";
    const VERSION: &'static str = "~> 4.67";
}

impl Default for AwsProvider {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key: None,
            secret_key: None,
        }
    }
}
