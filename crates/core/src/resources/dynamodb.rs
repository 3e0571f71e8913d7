use serde::Serialize;

use crate::synth::{TerraformDataSource, TerraformResource};

/// DynamoDB scalar attribute types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    #[default]
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    #[default]
    PayPerRequest,
    Provisioned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReplica {
    pub region_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamodbTable {
    pub name: String,
    pub hash_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    pub billing_mode: BillingMode,
    pub attribute: Vec<TableAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replica: Vec<TableReplica>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_view_type: Option<String>,
}

impl TerraformResource for DynamodbTable {
    const RESOURCE_TYPE: &'static str = "aws_dynamodb_table";
}

/// Lookup of a table declared by another stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataDynamodbTable {
    pub name: String,
}

impl TerraformDataSource for DataDynamodbTable {
    const DATA_TYPE: &'static str = "aws_dynamodb_table";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_type_codes() {
        assert_eq!(serde_json::to_value(AttributeType::String).unwrap(), json!("S"));
        assert_eq!(serde_json::to_value(AttributeType::Number).unwrap(), json!("N"));
        assert_eq!(serde_json::to_value(AttributeType::Binary).unwrap(), json!("B"));
    }

    #[test]
    fn test_billing_mode_codes() {
        assert_eq!(
            serde_json::to_value(BillingMode::PayPerRequest).unwrap(),
            json!("PAY_PER_REQUEST")
        );
        assert_eq!(
            serde_json::to_value(BillingMode::Provisioned).unwrap(),
            json!("PROVISIONED")
        );
    }
}
