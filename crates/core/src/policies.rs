//! IAM policy documents assembled from resource-policy fragments.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Result;

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Managed policy that lets a Lambda write to CloudWatch Logs.
pub const LAMBDA_BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

pub const DYNAMO_READ_ACTIONS: &[&str] = &[
    "dynamodb:GetItem",
    "dynamodb:BatchGetItem",
    "dynamodb:Query",
    "dynamodb:Scan",
];

pub const DYNAMO_READ_WRITE_ACTIONS: &[&str] = &[
    "dynamodb:GetItem",
    "dynamodb:BatchGetItem",
    "dynamodb:Query",
    "dynamodb:Scan",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:BatchWriteItem",
];

/// A set of actions allowed on a set of resource ARNs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePolicy {
    pub resources: Vec<String>,
    pub actions: Vec<String>,
}

/// One `Allow` statement of a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub effect: &'static str,
    pub action: Vec<String>,
    pub resource: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: &'static str,
    pub statement: Vec<PolicyStatement>,
}

impl ResourcePolicy {
    pub fn new<R, A>(resources: R, actions: A) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            resources: resources.into_iter().map(Into::into).collect(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// A fragment with no actions or no resources grants nothing.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() || self.actions.is_empty()
    }
}

impl PolicyDocument {
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }

    /// Encodes the document the way IAM resources expect it.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Folds one fragment into an `Allow` statement.
pub fn policy_statement(fragment: &ResourcePolicy) -> PolicyStatement {
    PolicyStatement {
        effect: "Allow",
        action: fragment.actions.clone(),
        resource: fragment.resources.clone(),
    }
}

/// Builds a policy document from fragments, dropping empty ones.
pub fn policy_document(fragments: &[ResourcePolicy]) -> PolicyDocument {
    PolicyDocument {
        version: POLICY_VERSION,
        statement: fragments
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .map(policy_statement)
            .collect(),
    }
}

pub fn dynamo_policy(table_arns: &[String], actions: &[&str]) -> ResourcePolicy {
    ResourcePolicy::new(table_arns.iter().cloned(), actions.iter().copied())
}

pub fn secret_read_policy(secret_arn: &str) -> ResourcePolicy {
    ResourcePolicy::new([secret_arn], ["secretsmanager:GetSecretValue"])
}

pub fn lambda_invoke_policy(function_arn: &str) -> ResourcePolicy {
    ResourcePolicy::new([function_arn], ["lambda:InvokeFunction"])
}

/// Trust policy allowing the Lambda service to assume a role.
pub fn lambda_assume_role_policy() -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Action": "sts:AssumeRole",
                "Principal": {
                    "Service": "lambda.amazonaws.com"
                },
                "Effect": "Allow",
                "Sid": ""
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_statement_maps_fields() {
        let fragment = ResourcePolicy::new(
            ["arn:aws:dynamodb:us-east-1:123:table/Users-nonprod"],
            ["dynamodb:GetItem"],
        );
        let statement = policy_statement(&fragment);

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "Effect": "Allow",
                "Action": ["dynamodb:GetItem"],
                "Resource": ["arn:aws:dynamodb:us-east-1:123:table/Users-nonprod"],
            })
        );
    }

    #[test]
    fn test_policy_document_drops_empty_fragments() {
        let fragments = vec![
            dynamo_policy(&["arn:table".to_string()], DYNAMO_READ_ACTIONS),
            ResourcePolicy::new(Vec::<String>::new(), ["dynamodb:GetItem"]),
            ResourcePolicy::new(["arn:secret"], Vec::<String>::new()),
            secret_read_policy("arn:secret"),
        ];

        let document = policy_document(&fragments);

        assert_eq!(document.statement.len(), 2);
        assert_eq!(document.statement[1].action, vec!["secretsmanager:GetSecretValue"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(policy_document(&[]).is_empty());
        assert!(policy_document(&[ResourcePolicy::default()]).is_empty());
    }

    #[test]
    fn test_document_json_string() {
        let document = policy_document(&[lambda_invoke_policy(
            "${aws_lambda_function.user-services-dev-dev.arn}",
        )]);

        let encoded = document.to_json_string().unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            decoded,
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Action": ["lambda:InvokeFunction"],
                    "Resource": ["${aws_lambda_function.user-services-dev-dev.arn}"],
                }]
            })
        );
    }

    #[test]
    fn test_assume_role_policy_trusts_lambda() {
        let policy = lambda_assume_role_policy();
        assert_eq!(policy["Statement"][0]["Action"], "sts:AssumeRole");
        assert_eq!(
            policy["Statement"][0]["Principal"]["Service"],
            "lambda.amazonaws.com"
        );
    }
}
