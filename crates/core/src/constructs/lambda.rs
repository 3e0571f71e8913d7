use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::environment::Environment;
use crate::error::Result;
use crate::policies::{
    lambda_assume_role_policy, policy_document, ResourcePolicy, LAMBDA_BASIC_EXECUTION_POLICY_ARN,
};
use crate::resources::{
    IamRole, IamRolePolicy, IamRolePolicyAttachment, LambdaEnvironment, LambdaFunction,
    LambdaPermission, S3Bucket, S3Object,
};
use crate::synth::{ResourceRef, Stack, TerraformAsset};

/// Handler used when a spec does not name one.
pub const DEFAULT_ENTRY_POINT: &str = "index.handler";

/// Everything needed to declare one Lambda function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaSpec {
    pub name: String,
    pub runtime: String,
    /// Version tag of the deployed code.
    pub version: String,
    pub env: Environment,
    pub entry_point: String,
    /// When set, API Gateway calls from this ARN are allowed to invoke the function.
    pub source_arn: Option<String>,
    pub policies: Vec<ResourcePolicy>,
    /// Deployment package uploaded to the staging bucket.
    pub artifact: PathBuf,
    pub variables: BTreeMap<String, String>,
}

impl LambdaSpec {
    pub fn new(
        name: impl Into<String>,
        runtime: impl Into<String>,
        version: impl Into<String>,
        env: Environment,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            runtime: runtime.into(),
            version: version.into(),
            env,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            source_arn: None,
            policies: Vec::new(),
            artifact: artifact.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_source_arn(mut self, source_arn: impl Into<String>) -> Self {
        self.source_arn = Some(source_arn.into());
        self
    }

    pub fn with_policy(mut self, policy: ResourcePolicy) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    fn suffix(&self) -> String {
        format!("{}-{}", self.name, self.env)
    }
}

/// Handles to the resources declared for one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaFunc {
    pub function: ResourceRef,
    pub role: ResourceRef,
    pub bucket: ResourceRef,
    pub archive: ResourceRef,
    pub inline_policy: Option<ResourceRef>,
    pub permission: Option<ResourceRef>,
}

impl LambdaFunc {
    pub fn arn(&self) -> String {
        self.function.attr("arn")
    }

    pub fn invoke_arn(&self) -> String {
        self.function.attr("invoke_arn")
    }

    pub fn function_name(&self) -> String {
        self.function.attr("function_name")
    }

    pub fn role_name(&self) -> String {
        self.role.attr("name")
    }
}

/// Packages the artifact, stages it in a fresh bucket and declares the
/// function with its role, policies and API Gateway permission.
///
/// `construct_name` only feeds the bucket prefix; every id is derived from
/// the spec's name and environment.
pub fn create_lambda_func(
    stack: &mut Stack,
    construct_name: &str,
    spec: &LambdaSpec,
) -> Result<LambdaFunc> {
    let suffix = spec.suffix();

    let asset = TerraformAsset::from_file(format!("asset-{}", suffix), &spec.artifact)?;
    let archive_key = format!("{}{}/{}", spec.name, spec.env, asset.file_name());
    let asset_path = asset.path();
    let asset_hash = asset.hash().to_string();

    let bucket = stack.add_resource(
        &format!("bucket-{}", suffix),
        &S3Bucket {
            bucket_prefix: format!("{}-{}", spec.env, construct_name),
        },
    )?;

    let archive = stack.add_resource(
        &format!("archive-{}", suffix),
        &S3Object {
            bucket: bucket.attr("bucket"),
            key: archive_key,
            source: asset_path,
            source_hash: Some(asset_hash),
        },
    )?;

    let role = stack.add_resource(
        &format!("role-{}", suffix),
        &IamRole {
            name: spec.name.clone(),
            assume_role_policy: lambda_assume_role_policy().to_string(),
        },
    )?;

    stack.add_resource(
        &format!("policy-{}", suffix),
        &IamRolePolicyAttachment {
            policy_arn: LAMBDA_BASIC_EXECUTION_POLICY_ARN.to_string(),
            role: role.attr("name"),
        },
    )?;

    let document = policy_document(&spec.policies);
    let inline_policy = if document.is_empty() {
        None
    } else {
        Some(stack.add_resource(
            &format!("inline-policy-{}", suffix),
            &IamRolePolicy {
                name: format!("{}-resource-access", spec.name),
                role: role.attr("id"),
                policy: document.to_json_string()?,
            },
        )?)
    };

    let mut variables = spec.variables.clone();
    variables.insert("ENV".to_string(), spec.env.to_string());

    let mut tags = BTreeMap::new();
    tags.insert("Environment".to_string(), spec.env.to_string());
    tags.insert("Version".to_string(), spec.version.clone());

    let function = stack.add_resource(
        &suffix,
        &LambdaFunction {
            function_name: spec.name.clone(),
            s3_bucket: bucket.attr("bucket"),
            s3_key: archive.attr("key"),
            handler: spec.entry_point.clone(),
            runtime: spec.runtime.clone(),
            role: role.attr("arn"),
            environment: Some(LambdaEnvironment { variables }),
            tags,
        },
    )?;

    let permission = match &spec.source_arn {
        Some(source_arn) => Some(stack.add_resource(
            &format!("permission-{}", suffix),
            &LambdaPermission {
                statement_id: "AllowExecutionFromAPIGateway".to_string(),
                action: "lambda:InvokeFunction".to_string(),
                function_name: function.attr("function_name"),
                principal: "apigateway.amazonaws.com".to_string(),
                source_arn: source_arn.clone(),
            },
        )?),
        None => None,
    };

    // Last, so a failed declaration leaves no orphan asset.
    stack.add_asset(asset)?;

    tracing::debug!(
        stack = stack.name(),
        function = %spec.name,
        statements = document.statement.len(),
        "Declared lambda function"
    );

    Ok(LambdaFunc {
        function,
        role,
        bucket,
        archive,
        inline_policy,
        permission,
    })
}
