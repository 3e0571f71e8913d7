use crate::error::Result;
use crate::resources::{
    AttributeType, BillingMode, DataDynamodbTable, DynamodbTable, TableAttribute, TableReplica,
};
use crate::synth::{ResourceRef, Stack};

/// Table schema for [`add_dynamo_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub primary_key_name: String,
    pub primary_key_type: Option<AttributeType>,
    pub sort_key_name: Option<String>,
    pub sort_key_type: Option<AttributeType>,
    /// Regions that get a global table replica.
    pub additional_regions: Vec<String>,
}

impl TableSpec {
    /// A table keyed by a single string hash key.
    pub fn new(name: impl Into<String>, primary_key_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key_name: primary_key_name.into(),
            primary_key_type: None,
            sort_key_name: None,
            sort_key_type: None,
            additional_regions: Vec::new(),
        }
    }

    pub fn with_primary_key_type(mut self, key_type: AttributeType) -> Self {
        self.primary_key_type = Some(key_type);
        self
    }

    pub fn with_sort_key(mut self, name: impl Into<String>, key_type: AttributeType) -> Self {
        self.sort_key_name = Some(name.into());
        self.sort_key_type = Some(key_type);
        self
    }

    pub fn with_replica(mut self, region: impl Into<String>) -> Self {
        self.additional_regions.push(region.into());
        self
    }
}

/// Handle to a table, declared here or looked up from another stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoTable {
    pub name: String,
    pub reference: ResourceRef,
}

impl DynamoTable {
    pub fn arn(&self) -> String {
        self.reference.attr("arn")
    }
}

/// Declares a pay-per-request table with a hash key and optional range key.
///
/// Key types default to `S`. Replicas require streams, so any additional
/// region also turns on `NEW_AND_OLD_IMAGES` streaming.
pub fn add_dynamo_store(stack: &mut Stack, spec: &TableSpec) -> Result<DynamoTable> {
    let mut attribute = vec![TableAttribute {
        name: spec.primary_key_name.clone(),
        attribute_type: spec.primary_key_type.unwrap_or_default(),
    }];
    if let Some(sort_key) = &spec.sort_key_name {
        attribute.push(TableAttribute {
            name: sort_key.clone(),
            attribute_type: spec.sort_key_type.unwrap_or_default(),
        });
    }

    let replica: Vec<TableReplica> = spec
        .additional_regions
        .iter()
        .map(|region| TableReplica {
            region_name: region.clone(),
        })
        .collect();
    let replicated = !replica.is_empty();

    let reference = stack.add_resource(
        &spec.name,
        &DynamodbTable {
            name: spec.name.clone(),
            hash_key: spec.primary_key_name.clone(),
            range_key: spec.sort_key_name.clone(),
            billing_mode: BillingMode::PayPerRequest,
            attribute,
            replica,
            stream_enabled: replicated.then_some(true),
            stream_view_type: replicated.then(|| "NEW_AND_OLD_IMAGES".to_string()),
        },
    )?;

    Ok(DynamoTable {
        name: spec.name.clone(),
        reference,
    })
}

/// References a table owned by another stack through a data source.
pub fn lookup_dynamo_table(stack: &mut Stack, id: &str, name: &str) -> Result<DynamoTable> {
    let reference = stack.add_data_source(
        id,
        &DataDynamodbTable {
            name: name.to_string(),
        },
    )?;

    Ok(DynamoTable {
        name: name.to_string(),
        reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_with_sort_key() {
        let mut stack = Stack::new("test");
        let table = add_dynamo_store(
            &mut stack,
            &TableSpec::new("Users-nonprod", "Email").with_sort_key("Gym", AttributeType::String),
        )
        .unwrap();

        assert_eq!(table.arn(), "${aws_dynamodb_table.Users-nonprod.arn}");
        assert_eq!(
            stack.resource("aws_dynamodb_table", "Users-nonprod"),
            Some(&json!({
                "name": "Users-nonprod",
                "hash_key": "Email",
                "range_key": "Gym",
                "billing_mode": "PAY_PER_REQUEST",
                "attribute": [
                    { "name": "Email", "type": "S" },
                    { "name": "Gym", "type": "S" },
                ],
            }))
        );
    }

    #[test]
    fn test_table_without_sort_key_has_single_attribute() {
        let mut stack = Stack::new("test");
        add_dynamo_store(
            &mut stack,
            &TableSpec::new("Counters", "Id").with_primary_key_type(AttributeType::Number),
        )
        .unwrap();

        let body = stack.resource("aws_dynamodb_table", "Counters").unwrap();
        assert!(body.get("range_key").is_none());
        assert_eq!(body["attribute"], json!([{ "name": "Id", "type": "N" }]));
    }

    #[test]
    fn test_sort_key_type_defaults_to_string() {
        let mut spec = TableSpec::new("Events", "Id");
        spec.sort_key_name = Some("At".to_string());

        let mut stack = Stack::new("test");
        add_dynamo_store(&mut stack, &spec).unwrap();

        let body = stack.resource("aws_dynamodb_table", "Events").unwrap();
        assert_eq!(body["attribute"][1], json!({ "name": "At", "type": "S" }));
    }

    #[test]
    fn test_replicas_enable_streams() {
        let mut stack = Stack::new("test");
        add_dynamo_store(
            &mut stack,
            &TableSpec::new("Users-prod", "Email").with_replica("us-west-2"),
        )
        .unwrap();

        let body = stack.resource("aws_dynamodb_table", "Users-prod").unwrap();
        assert_eq!(body["replica"], json!([{ "region_name": "us-west-2" }]));
        assert_eq!(body["stream_enabled"], true);
        assert_eq!(body["stream_view_type"], "NEW_AND_OLD_IMAGES");
    }

    #[test]
    fn test_lookup_table() {
        let mut stack = Stack::new("test");
        let table = lookup_dynamo_table(&mut stack, "Users-nonprod", "Users-nonprod").unwrap();

        assert_eq!(table.arn(), "${data.aws_dynamodb_table.Users-nonprod.arn}");
        assert_eq!(
            stack.data_source("aws_dynamodb_table", "Users-nonprod"),
            Some(&json!({ "name": "Users-nonprod" }))
        );
    }

    #[test]
    fn test_duplicate_table_is_rejected() {
        let mut stack = Stack::new("test");
        let spec = TableSpec::new("Users-nonprod", "Email");
        add_dynamo_store(&mut stack, &spec).unwrap();
        assert!(add_dynamo_store(&mut stack, &spec).is_err());
    }
}
