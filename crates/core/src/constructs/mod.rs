//! Reusable declaration units.
//!
//! Each construct is a plain function that declares a handful of related
//! resources on a [`Stack`](crate::synth::Stack) and returns handles whose
//! tokens can be passed into later declarations.

mod api_gateway;
mod dynamo_store;
mod gateway_integration;
mod lambda;

pub use api_gateway::{add_api_gateway, deploy_api, ApiDeployment, ApiGatewayConfig, RestApi};
pub use dynamo_store::{add_dynamo_store, lookup_dynamo_table, DynamoTable, TableSpec};
pub use gateway_integration::{
    create_gateway_integration_for_lambda, GatewayIntegration, GatewayIntegrationSpec,
};
pub use lambda::{create_lambda_func, LambdaFunc, LambdaSpec, DEFAULT_ENTRY_POINT};
