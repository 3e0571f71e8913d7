//! The backend services stack, declared once per environment.
//!
//! Each environment gets a REST API routing `/user` and `/client` to their
//! own Lambda functions. The environments that own their tier's shared
//! resources (`dev` for nonprod, `prod`) also declare the user tables and
//! the auth service, which is exposed on a private `/auth` route. `qa` and
//! `staging` look the nonprod tables up instead.

mod config;

pub use config::{BackendConfig, DEFAULT_ARTIFACT, DEFAULT_RUNTIME, DEFAULT_VERSION};

use crate::constructs::{
    add_api_gateway, add_dynamo_store, create_gateway_integration_for_lambda, create_lambda_func,
    deploy_api, lookup_dynamo_table, ApiDeployment, ApiGatewayConfig, DynamoTable,
    GatewayIntegration, GatewayIntegrationSpec, LambdaFunc, LambdaSpec, RestApi, TableSpec,
};
use crate::environment::{Environment, Tier};
use crate::error::Result;
use crate::policies::{
    dynamo_policy, lambda_invoke_policy, secret_read_policy, DYNAMO_READ_ACTIONS,
    DYNAMO_READ_WRITE_ACTIONS,
};
use crate::resources::{AttributeType, AwsProvider, DataSecretsmanagerSecret};
use crate::synth::{App, Stack, TerraformOutput};

/// A synthesized-ready backend stack and the handles it exposes.
#[derive(Debug, Clone)]
pub struct BackendStack {
    pub env: Environment,
    pub stack: Stack,
    pub api: RestApi,
    pub deployment: ApiDeployment,
    pub auth_service: Option<LambdaFunc>,
    pub user_service: LambdaFunc,
    pub client_service: LambdaFunc,
    pub user_table: DynamoTable,
    pub user_stats_table: DynamoTable,
}

/// Name of the stack for an environment.
pub fn stack_name(env: Environment) -> String {
    format!("backend-np-infra-{}", env)
}

pub fn user_table_spec(tier: Tier) -> TableSpec {
    TableSpec::new(format!("Users-{}", tier), "Email")
        .with_primary_key_type(AttributeType::String)
        .with_sort_key("Gym", AttributeType::String)
}

pub fn user_stats_table_spec(tier: Tier) -> TableSpec {
    TableSpec::new(format!("User-Stats-{}", tier), "Id")
        .with_primary_key_type(AttributeType::String)
        .with_sort_key("Gym", AttributeType::String)
}

/// Declares the whole backend for one environment.
pub fn backend_np_infra_stack(env: Environment, config: &BackendConfig) -> Result<BackendStack> {
    let mut stack = Stack::new(stack_name(env));
    let tier = env.tier();

    stack.add_provider(&AwsProvider {
        region: config.region.clone(),
        access_key: config.access_key.clone(),
        secret_key: config.secret_key.clone(),
    })?;

    let api = add_api_gateway(
        &mut stack,
        &ApiGatewayConfig {
            name: format!("backend-services-{}", env),
            env,
        },
    )?;
    let source_arn = api.any_route_source_arn();

    let (user_table, user_stats_table) = if env.owns_shared_resources() {
        (
            add_dynamo_store(&mut stack, &user_table_spec(tier))?,
            add_dynamo_store(&mut stack, &user_stats_table_spec(tier))?,
        )
    } else {
        let users = user_table_spec(tier);
        let stats = user_stats_table_spec(tier);
        (
            lookup_dynamo_table(&mut stack, &users.name, &users.name)?,
            lookup_dynamo_table(&mut stack, &stats.name, &stats.name)?,
        )
    };
    let table_arns = vec![user_table.arn(), user_stats_table.arn()];

    let auth_service = if env.owns_shared_resources() {
        let name = format!("auth-service-{}", tier);
        let secret_name = format!("{}-secrets", name);
        let secret = stack.add_data_source(
            &secret_name,
            &DataSecretsmanagerSecret {
                name: secret_name.clone(),
            },
        )?;

        let spec = LambdaSpec::new(
            &name,
            &config.runtime,
            &config.version,
            env,
            &config.artifact,
        )
        .with_source_arn(&source_arn)
        .with_policy(dynamo_policy(&table_arns, DYNAMO_READ_WRITE_ACTIONS))
        .with_policy(secret_read_policy(&secret.attr("arn")))
        .with_variable("SECRET_ARN", secret.attr("arn"));

        Some(create_lambda_func(&mut stack, &name, &spec)?)
    } else {
        None
    };

    let user_service_name = format!("user-services-{}", env);
    let user_service = create_lambda_func(
        &mut stack,
        &user_service_name,
        &LambdaSpec::new(
            &user_service_name,
            &config.runtime,
            &config.version,
            env,
            &config.artifact,
        )
        .with_source_arn(&source_arn)
        .with_policy(dynamo_policy(&table_arns, DYNAMO_READ_WRITE_ACTIONS))
        .with_variable("USERS_TABLE", &user_table.name)
        .with_variable("USER_STATS_TABLE", &user_stats_table.name),
    )?;

    let client_service_name = format!("client-services-{}", env);
    let client_service = create_lambda_func(
        &mut stack,
        &client_service_name,
        &LambdaSpec::new(
            &client_service_name,
            &config.runtime,
            &config.version,
            env,
            &config.artifact,
        )
        .with_source_arn(&source_arn)
        .with_policy(dynamo_policy(&[user_table.arn()], DYNAMO_READ_ACTIONS))
        .with_policy(lambda_invoke_policy(&user_service.arn()))
        .with_variable("USERS_TABLE", &user_table.name)
        .with_variable("USER_SERVICE_ARN", user_service.arn()),
    )?;

    let mut routes: Vec<GatewayIntegration> = Vec::new();
    for (path_part, service, is_private) in [
        ("user", &user_service, false),
        ("client", &client_service, false),
    ] {
        routes.push(route(&mut stack, &api, env, path_part, service, is_private)?);
    }
    if let Some(auth) = &auth_service {
        routes.push(route(&mut stack, &api, env, "auth", auth, true)?);
    }

    let route_refs: Vec<&GatewayIntegration> = routes.iter().collect();
    let deployment = deploy_api(&mut stack, &api, env, &route_refs)?;

    stack.add_output(
        "api-invoke-url",
        &TerraformOutput::new(deployment.invoke_url())
            .with_description("Base URL of the backend services stage"),
    )?;
    stack.add_output("user-table-arn", &TerraformOutput::new(user_table.arn()))?;
    stack.add_output(
        "user-stats-table-arn",
        &TerraformOutput::new(user_stats_table.arn()),
    )?;
    if let Some(auth) = &auth_service {
        stack.add_output("auth-service-arn", &TerraformOutput::new(auth.arn()))?;
    }

    let auth_service_arn = auth_service.as_ref().map(LambdaFunc::arn);
    tracing::info!(
        stack = stack.name(),
        user_table_arn = %user_table.arn(),
        user_stats_table_arn = %user_stats_table.arn(),
        auth_service_arn = auth_service_arn.as_deref(),
        "Declared backend stack"
    );

    Ok(BackendStack {
        env,
        stack,
        api,
        deployment,
        auth_service,
        user_service,
        client_service,
        user_table,
        user_stats_table,
    })
}

fn route(
    stack: &mut Stack,
    api: &RestApi,
    env: Environment,
    path_part: &str,
    service: &LambdaFunc,
    is_private: bool,
) -> Result<GatewayIntegration> {
    create_gateway_integration_for_lambda(
        stack,
        &GatewayIntegrationSpec {
            path_part: path_part.to_string(),
            env,
            api: api.clone(),
            lambda_invoke_arn: service.invoke_arn(),
            is_private,
        },
    )
}

/// Builds one stack per requested environment, in `dev, qa, staging, prod` order.
pub fn build_app(config: &BackendConfig, envs: &[Environment]) -> Result<App> {
    let mut app = App::new();
    for env in Environment::ALL {
        if envs.contains(&env) {
            app.add_stack(backend_np_infra_stack(env, config)?.stack)?;
        }
    }
    Ok(app)
}
