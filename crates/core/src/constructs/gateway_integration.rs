use super::RestApi;
use crate::environment::Environment;
use crate::error::Result;
use crate::resources::{ApiGatewayIntegration, ApiGatewayMethod, ApiGatewayResource};
use crate::synth::{ResourceRef, Stack};

/// Wiring of one path segment to a Lambda function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayIntegrationSpec {
    pub path_part: String,
    pub env: Environment,
    pub api: RestApi,
    pub lambda_invoke_arn: String,
    /// Private routes require IAM-signed requests.
    pub is_private: bool,
}

impl GatewayIntegrationSpec {
    pub fn authorization(&self) -> &'static str {
        if self.is_private {
            "AWS_IAM"
        } else {
            "NONE"
        }
    }
}

/// Handles to the resource, method and integration of one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayIntegration {
    pub resource: ResourceRef,
    pub method: ResourceRef,
    pub integration: ResourceRef,
}

/// Declares `/<path_part>` with an `ANY` method proxied to the Lambda.
pub fn create_gateway_integration_for_lambda(
    stack: &mut Stack,
    spec: &GatewayIntegrationSpec,
) -> Result<GatewayIntegration> {
    let resource = stack.add_resource_depending_on(
        &format!("{}-gw-resource-{}", spec.path_part, spec.env),
        &ApiGatewayResource {
            rest_api_id: spec.api.id(),
            parent_id: spec.api.root_resource_id(),
            path_part: spec.path_part.clone(),
        },
        &[spec.api.reference()],
    )?;

    let method = stack.add_resource_depending_on(
        &format!("{}-integration-method-{}", spec.path_part, spec.env),
        &ApiGatewayMethod {
            authorization: spec.authorization().to_string(),
            http_method: "ANY".to_string(),
            resource_id: resource.attr("id"),
            rest_api_id: spec.api.id(),
        },
        &[&resource],
    )?;

    // Lambda proxy integrations are always invoked with POST.
    let integration = stack.add_resource_depending_on(
        &format!("{}-services-integration-{}", spec.path_part, spec.env),
        &ApiGatewayIntegration {
            rest_api_id: spec.api.id(),
            resource_id: resource.attr("id"),
            http_method: method.attr("http_method"),
            integration_http_method: "POST".to_string(),
            integration_type: "AWS_PROXY".to_string(),
            uri: spec.lambda_invoke_arn.clone(),
        },
        &[&method],
    )?;

    Ok(GatewayIntegration {
        resource,
        method,
        integration,
    })
}
