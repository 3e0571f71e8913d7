use std::collections::BTreeMap;

use super::GatewayIntegration;
use crate::environment::Environment;
use crate::error::Result;
use crate::resources::{ApiGatewayDeployment, ApiGatewayRestApi, ApiGatewayStage, Lifecycle};
use crate::synth::{ResourceRef, Stack};

/// Input for [`add_api_gateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayConfig {
    pub name: String,
    pub env: Environment,
}

/// Handle to a declared REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApi {
    name: String,
    reference: ResourceRef,
}

impl RestApi {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &ResourceRef {
        &self.reference
    }

    pub fn id(&self) -> String {
        self.reference.attr("id")
    }

    pub fn root_resource_id(&self) -> String {
        self.reference.attr("root_resource_id")
    }

    pub fn execution_arn(&self) -> String {
        self.reference.attr("execution_arn")
    }

    /// Source ARN matching every stage, method and path of this API.
    pub fn any_route_source_arn(&self) -> String {
        format!("{}/*/*", self.execution_arn())
    }
}

/// Declares one REST API, named `<env>-<name>`.
pub fn add_api_gateway(stack: &mut Stack, config: &ApiGatewayConfig) -> Result<RestApi> {
    let reference = stack.add_resource(
        &config.name,
        &ApiGatewayRestApi {
            name: format!("{}-{}", config.env, config.name),
            description: Some(format!("Backend services ({})", config.env)),
        },
    )?;

    Ok(RestApi {
        name: config.name.clone(),
        reference,
    })
}

/// Handles to the deployment and stage of an API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDeployment {
    pub deployment: ResourceRef,
    pub stage: ResourceRef,
}

impl ApiDeployment {
    pub fn invoke_url(&self) -> String {
        self.stage.attr("invoke_url")
    }
}

/// Declares a deployment of the API and a stage named after the environment.
///
/// The deployment depends on every integration and is replaced whenever one
/// of the routes changes.
pub fn deploy_api(
    stack: &mut Stack,
    api: &RestApi,
    env: Environment,
    integrations: &[&GatewayIntegration],
) -> Result<ApiDeployment> {
    let route_ids: Vec<String> = integrations
        .iter()
        .flat_map(|i| [&i.resource, &i.method, &i.integration])
        .map(|r| format!("{}.id", r.address()))
        .collect();

    let mut triggers = BTreeMap::new();
    triggers.insert(
        "redeployment".to_string(),
        format!("${{sha1(jsonencode([{}]))}}", route_ids.join(", ")),
    );

    let depends_on: Vec<&ResourceRef> = integrations.iter().map(|i| &i.integration).collect();
    let deployment = stack.add_resource_depending_on(
        &format!("{}-deployment", api.name()),
        &ApiGatewayDeployment {
            rest_api_id: api.id(),
            triggers,
            lifecycle: Lifecycle {
                create_before_destroy: true,
            },
        },
        &depends_on,
    )?;

    let stage = stack.add_resource(
        &format!("{}-stage", api.name()),
        &ApiGatewayStage {
            deployment_id: deployment.attr("id"),
            rest_api_id: api.id(),
            stage_name: env.to_string(),
        },
    )?;

    Ok(ApiDeployment { deployment, stage })
}
