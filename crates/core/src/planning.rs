//! Pure functions for comparing a stack against its previous synth (Functional Core).

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A change to one resource or data source address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "address", rename_all = "lowercase")]
pub enum ResourceChange {
    Create(String),
    Update(String),
    Delete(String),
}

/// Planned changes for one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum StackPlan {
    /// The stack was never synthesized.
    CreateStack {
        stack_name: String,
        addresses: Vec<String>,
    },
    /// The stack exists and some declarations changed.
    UpdateStack {
        stack_name: String,
        changes: Vec<ResourceChange>,
    },
    /// The synthesized output is up to date.
    NoChanges { stack_name: String },
}

/// Plan for removing a stack's synthesized output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanPlan {
    RemoveStack { stack_name: String },
    AlreadyGone { stack_name: String },
}

impl StackPlan {
    pub fn stack_name(&self) -> &str {
        match self {
            StackPlan::CreateStack { stack_name, .. }
            | StackPlan::UpdateStack { stack_name, .. }
            | StackPlan::NoChanges { stack_name } => stack_name,
        }
    }

    pub fn has_deletions(&self) -> bool {
        match self {
            StackPlan::UpdateStack { changes, .. } => changes
                .iter()
                .any(|c| matches!(c, ResourceChange::Delete(_))),
            _ => false,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, StackPlan::NoChanges { .. })
    }
}

/// Flattens the `resource` and `data` sections of a document into address -> body.
pub fn declarations(document: &Value) -> BTreeMap<String, &Value> {
    let mut out = BTreeMap::new();
    for (section, prefix) in [("resource", ""), ("data", "data.")] {
        let Some(types) = document.get(section).and_then(Value::as_object) else {
            continue;
        };
        for (resource_type, ids) in types {
            let Some(ids) = ids.as_object() else {
                continue;
            };
            for (id, body) in ids {
                out.insert(format!("{}{}.{}", prefix, resource_type, id), body);
            }
        }
    }
    out
}

/// Flattens the rest of a document into entry -> body.
///
/// `provider` and `output` are split per provider name and output id; any
/// other top-level block (`terraform`, the `"//"` metadata) is one entry.
pub fn settings(document: &Value) -> BTreeMap<String, &Value> {
    let mut out = BTreeMap::new();
    let Some(root) = document.as_object() else {
        return out;
    };
    for (key, value) in root {
        match key.as_str() {
            "resource" | "data" => {}
            "provider" | "output" => {
                let Some(children) = value.as_object() else {
                    out.insert(key.clone(), value);
                    continue;
                };
                for (name, body) in children {
                    out.insert(format!("{}.{}", key, name), body);
                }
            }
            "//" => {
                out.insert("metadata".to_string(), value);
            }
            _ => {
                out.insert(key.clone(), value);
            }
        }
    }
    out
}

fn diff_entries(
    current: &BTreeMap<String, &Value>,
    desired: &BTreeMap<String, &Value>,
    changes: &mut Vec<ResourceChange>,
) {
    for (address, body) in desired {
        match current.get(address) {
            None => changes.push(ResourceChange::Create(address.clone())),
            Some(previous) if previous != body => {
                changes.push(ResourceChange::Update(address.clone()))
            }
            Some(_) => {}
        }
    }
    for address in current.keys() {
        if !desired.contains_key(address) {
            changes.push(ResourceChange::Delete(address.clone()));
        }
    }
}

/// Pure function: Calculate what changed between the previous and the new document.
///
/// Resource and data source changes come first, then provider, output and
/// other block changes. `NoChanges` means the documents are identical.
pub fn calculate_stack_plan(
    stack_name: &str,
    current: Option<&Value>,
    desired: &Value,
) -> StackPlan {
    let desired_decls = declarations(desired);

    let Some(current) = current else {
        return StackPlan::CreateStack {
            stack_name: stack_name.to_string(),
            addresses: desired_decls.into_keys().collect(),
        };
    };

    let mut changes = Vec::new();
    diff_entries(&declarations(current), &desired_decls, &mut changes);
    diff_entries(&settings(current), &settings(desired), &mut changes);

    if changes.is_empty() && current != desired {
        changes.push(ResourceChange::Update("document".to_string()));
    }

    if changes.is_empty() {
        StackPlan::NoChanges {
            stack_name: stack_name.to_string(),
        }
    } else {
        StackPlan::UpdateStack {
            stack_name: stack_name.to_string(),
            changes,
        }
    }
}

/// Pure function: Calculate clean plan.
pub fn calculate_clean_plan(exists: bool, stack_name: &str) -> CleanPlan {
    if exists {
        CleanPlan::RemoveStack {
            stack_name: stack_name.to_string(),
        }
    } else {
        CleanPlan::AlreadyGone {
            stack_name: stack_name.to_string(),
        }
    }
}

/// Pure function: Format a stack plan for display.
pub fn format_stack_plan(plan: &StackPlan) -> Vec<String> {
    match plan {
        StackPlan::CreateStack {
            stack_name,
            addresses,
        } => {
            let mut lines = vec![format!("+ Create stack: {}", stack_name)];
            for address in addresses {
                lines.push(format!("  + {}", address));
            }
            lines
        }
        StackPlan::UpdateStack {
            stack_name,
            changes,
        } => {
            let mut lines = vec![format!("~ Update stack: {}", stack_name)];
            for change in changes {
                lines.push(match change {
                    ResourceChange::Create(address) => format!("  + {}", address),
                    ResourceChange::Update(address) => format!("  ~ {}", address),
                    ResourceChange::Delete(address) => format!("  - {}", address),
                });
            }
            lines
        }
        StackPlan::NoChanges { stack_name } => {
            vec![format!("= Stack '{}' is up to date", stack_name)]
        }
    }
}

/// Pure function: Format a clean plan for display.
pub fn format_clean_plan(plan: &CleanPlan) -> Vec<String> {
    match plan {
        CleanPlan::RemoveStack { stack_name } => {
            vec![format!("- Remove synthesized stack: {}", stack_name)]
        }
        CleanPlan::AlreadyGone { stack_name } => {
            vec![format!("= Stack '{}' has no synthesized output", stack_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "resource": {
                "aws_dynamodb_table": {
                    "Users-nonprod": { "name": "Users-nonprod", "hash_key": "Email" }
                },
                "aws_s3_bucket": {
                    "bucket-a": { "bucket_prefix": "dev-a" }
                }
            },
            "data": {
                "aws_secretsmanager_secret": {
                    "auth-service-nonprod-secrets": { "name": "auth-service-nonprod-secrets" }
                }
            }
        })
    }

    #[test]
    fn test_declarations_include_data_sources() {
        let doc = document();
        let keys: Vec<String> = declarations(&doc).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                "aws_dynamodb_table.Users-nonprod",
                "aws_s3_bucket.bucket-a",
                "data.aws_secretsmanager_secret.auth-service-nonprod-secrets",
            ]
        );
    }

    #[test]
    fn test_first_synth_creates_stack() {
        let plan = calculate_stack_plan("backend-np-infra-dev", None, &document());
        match &plan {
            StackPlan::CreateStack { addresses, .. } => assert_eq!(addresses.len(), 3),
            other => panic!("unexpected plan: {:?}", other),
        }
        assert!(!plan.has_deletions());
    }

    #[test]
    fn test_identical_documents_have_no_changes() {
        let doc = document();
        let plan = calculate_stack_plan("backend-np-infra-dev", Some(&doc), &doc);
        assert!(plan.is_noop());
        assert_eq!(
            format_stack_plan(&plan),
            vec!["= Stack 'backend-np-infra-dev' is up to date"]
        );
    }

    #[test]
    fn test_create_update_delete() {
        let current = document();
        let mut desired = document();
        desired["resource"]["aws_dynamodb_table"]["Users-nonprod"]["hash_key"] = json!("Id");
        desired["resource"]["aws_s3_bucket"]
            .as_object_mut()
            .unwrap()
            .remove("bucket-a");
        desired["resource"]["aws_s3_bucket"]["bucket-b"] = json!({ "bucket_prefix": "dev-b" });

        let plan = calculate_stack_plan("backend-np-infra-dev", Some(&current), &desired);

        assert_eq!(
            plan,
            StackPlan::UpdateStack {
                stack_name: "backend-np-infra-dev".to_string(),
                changes: vec![
                    ResourceChange::Update("aws_dynamodb_table.Users-nonprod".to_string()),
                    ResourceChange::Create("aws_s3_bucket.bucket-b".to_string()),
                    ResourceChange::Delete("aws_s3_bucket.bucket-a".to_string()),
                ],
            }
        );
        assert!(plan.has_deletions());
        assert_eq!(
            format_stack_plan(&plan),
            vec![
                "~ Update stack: backend-np-infra-dev",
                "  ~ aws_dynamodb_table.Users-nonprod",
                "  + aws_s3_bucket.bucket-b",
                "  - aws_s3_bucket.bucket-a",
            ]
        );
    }

    #[test]
    fn test_provider_change_is_an_update() {
        let current = json!({
            "provider": { "aws": [{ "region": "us-east-1" }] },
            "resource": document()["resource"].clone(),
        });
        let mut desired = current.clone();
        desired["provider"]["aws"][0]["region"] = json!("eu-west-1");

        let plan = calculate_stack_plan("backend-np-infra-dev", Some(&current), &desired);

        assert!(!plan.is_noop());
        assert!(!plan.has_deletions());
        assert_eq!(
            format_stack_plan(&plan),
            vec!["~ Update stack: backend-np-infra-dev", "  ~ provider.aws"]
        );
    }

    #[test]
    fn test_output_and_metadata_changes() {
        let current = json!({
            "//": { "metadata": { "version": "0.0.0" } },
            "output": { "api-invoke-url": { "value": "a" }, "auth-service-arn": { "value": "b" } },
        });
        let desired = json!({
            "//": { "metadata": { "version": "0.1.0" } },
            "output": { "api-invoke-url": { "value": "c" } },
        });

        let plan = calculate_stack_plan("backend-np-infra-qa", Some(&current), &desired);

        assert_eq!(
            plan,
            StackPlan::UpdateStack {
                stack_name: "backend-np-infra-qa".to_string(),
                changes: vec![
                    ResourceChange::Update("metadata".to_string()),
                    ResourceChange::Update("output.api-invoke-url".to_string()),
                    ResourceChange::Delete("output.auth-service-arn".to_string()),
                ],
            }
        );
    }

    #[test]
    fn test_settings_split_providers_and_outputs() {
        let doc = json!({
            "terraform": { "backend": { "local": {} } },
            "provider": { "aws": [] },
            "output": { "user-table-arn": { "value": "x" } },
            "resource": {},
        });
        let keys: Vec<String> = settings(&doc).into_keys().collect();
        assert_eq!(keys, vec!["output.user-table-arn", "provider.aws", "terraform"]);
    }

    #[test]
    fn test_clean_plan() {
        assert_eq!(
            format_clean_plan(&calculate_clean_plan(true, "backend-np-infra-qa")),
            vec!["- Remove synthesized stack: backend-np-infra-qa"]
        );
        assert_eq!(
            calculate_clean_plan(false, "backend-np-infra-qa"),
            CleanPlan::AlreadyGone {
                stack_name: "backend-np-infra-qa".to_string()
            }
        );
    }

    #[test]
    fn test_plan_serializes_for_json_output() {
        let plan = StackPlan::UpdateStack {
            stack_name: "backend-np-infra-dev".to_string(),
            changes: vec![ResourceChange::Delete("aws_s3_bucket.bucket-a".to_string())],
        };
        assert_eq!(
            serde_json::to_value(&plan).unwrap(),
            json!({
                "plan": "update_stack",
                "stack_name": "backend-np-infra-dev",
                "changes": [{ "action": "delete", "address": "aws_s3_bucket.bucket-a" }],
            })
        );
    }
}
