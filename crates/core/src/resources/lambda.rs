use std::collections::BTreeMap;

use serde::Serialize;

use crate::synth::TerraformResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaEnvironment {
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaFunction {
    pub function_name: String,
    pub s3_bucket: String,
    pub s3_key: String,
    pub handler: String,
    pub runtime: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<LambdaEnvironment>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl TerraformResource for LambdaFunction {
    const RESOURCE_TYPE: &'static str = "aws_lambda_function";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaPermission {
    pub statement_id: String,
    pub action: String,
    pub function_name: String,
    pub principal: String,
    pub source_arn: String,
}

impl TerraformResource for LambdaPermission {
    const RESOURCE_TYPE: &'static str = "aws_lambda_permission";
}
