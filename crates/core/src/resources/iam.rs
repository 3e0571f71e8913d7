use serde::Serialize;

use crate::synth::TerraformResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IamRole {
    pub name: String,
    /// JSON-encoded trust policy.
    pub assume_role_policy: String,
}

impl TerraformResource for IamRole {
    const RESOURCE_TYPE: &'static str = "aws_iam_role";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IamRolePolicyAttachment {
    pub policy_arn: String,
    pub role: String,
}

impl TerraformResource for IamRolePolicyAttachment {
    const RESOURCE_TYPE: &'static str = "aws_iam_role_policy_attachment";
}

/// An inline role policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IamRolePolicy {
    pub name: String,
    pub role: String,
    /// JSON-encoded policy document.
    pub policy: String,
}

impl TerraformResource for IamRolePolicy {
    const RESOURCE_TYPE: &'static str = "aws_iam_role_policy";
}
