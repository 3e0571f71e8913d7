use std::collections::BTreeMap;

use serde::Serialize;

use crate::synth::TerraformResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayRestApi {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TerraformResource for ApiGatewayRestApi {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_rest_api";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayResource {
    pub rest_api_id: String,
    pub parent_id: String,
    pub path_part: String,
}

impl TerraformResource for ApiGatewayResource {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_resource";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayMethod {
    pub authorization: String,
    pub http_method: String,
    pub resource_id: String,
    pub rest_api_id: String,
}

impl TerraformResource for ApiGatewayMethod {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_method";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayIntegration {
    pub rest_api_id: String,
    pub resource_id: String,
    pub http_method: String,
    pub integration_http_method: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    pub uri: String,
}

impl TerraformResource for ApiGatewayIntegration {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_integration";
}

/// The `lifecycle` meta-argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lifecycle {
    pub create_before_destroy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayDeployment {
    pub rest_api_id: String,
    /// Any change to these values forces a new deployment.
    pub triggers: BTreeMap<String, String>,
    pub lifecycle: Lifecycle,
}

impl TerraformResource for ApiGatewayDeployment {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_deployment";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGatewayStage {
    pub deployment_id: String,
    pub rest_api_id: String,
    pub stage_name: String,
}

impl TerraformResource for ApiGatewayStage {
    const RESOURCE_TYPE: &'static str = "aws_api_gateway_stage";
}
