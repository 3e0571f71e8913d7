//! Terraform schemas for the AWS resources this repository declares.
//!
//! Field names follow the `hashicorp/aws` provider arguments so the structs
//! serialize directly into `cdk.tf.json` bodies.

mod api_gateway;
mod dynamodb;
mod iam;
mod lambda;
mod provider;
mod s3;
mod secrets;

pub use api_gateway::{
    ApiGatewayDeployment, ApiGatewayIntegration, ApiGatewayMethod, ApiGatewayResource,
    ApiGatewayRestApi, ApiGatewayStage, Lifecycle,
};
pub use dynamodb::{
    AttributeType, BillingMode, DataDynamodbTable, DynamodbTable, TableAttribute, TableReplica,
};
pub use iam::{IamRole, IamRolePolicy, IamRolePolicyAttachment};
pub use lambda::{LambdaEnvironment, LambdaFunction, LambdaPermission};
pub use provider::{AwsProvider, DEFAULT_REGION};
pub use s3::{S3Bucket, S3Object};
pub use secrets::DataSecretsmanagerSecret;
