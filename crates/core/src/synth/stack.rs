use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{validate_construct_id, ResourceRef, TerraformAsset, SYNTH_VERSION};
use crate::error::{InfraError, Result};

/// A managed resource schema (`resource "<type>" "<id>" {}`).
pub trait TerraformResource: Serialize {
    const RESOURCE_TYPE: &'static str;
}

/// A data source schema (`data "<type>" "<id>" {}`).
pub trait TerraformDataSource: Serialize {
    const DATA_TYPE: &'static str;
}

/// A provider configuration block.
pub trait TerraformProvider: Serialize {
    const PROVIDER_NAME: &'static str;
    const SOURCE: &'static str;
    const VERSION: &'static str;
}

/// A stack output (`output "<id>" {}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerraformOutput {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
}

impl TerraformOutput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            sensitive: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

type Blocks = BTreeMap<&'static str, BTreeMap<String, Value>>;

/// A named collection of declarations synthesized into one `cdk.tf.json`.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    name: String,
    construct_ids: BTreeSet<String>,
    required_providers: BTreeMap<&'static str, Value>,
    providers: BTreeMap<&'static str, Vec<Value>>,
    resources: Blocks,
    data: Blocks,
    outputs: BTreeMap<String, Value>,
    assets: Vec<TerraformAsset>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assets(&self) -> &[TerraformAsset] {
        &self.assets
    }

    /// Configures a provider and records it under `required_providers`.
    pub fn add_provider<P: TerraformProvider>(&mut self, provider: &P) -> Result<()> {
        let body = serde_json::to_value(provider)?;
        self.required_providers.insert(
            P::PROVIDER_NAME,
            json!({ "source": P::SOURCE, "version": P::VERSION }),
        );
        self.providers.entry(P::PROVIDER_NAME).or_default().push(body);
        Ok(())
    }

    pub fn add_resource<R: TerraformResource>(
        &mut self,
        id: &str,
        resource: &R,
    ) -> Result<ResourceRef> {
        self.add_resource_depending_on(id, resource, &[])
    }

    /// Declares a resource with explicit `depends_on` edges.
    pub fn add_resource_depending_on<R: TerraformResource>(
        &mut self,
        id: &str,
        resource: &R,
        depends_on: &[&ResourceRef],
    ) -> Result<ResourceRef> {
        let mut body = self.body_of(id, resource)?;
        if !depends_on.is_empty() {
            let addresses = depends_on.iter().map(|r| Value::String(r.address()));
            body.insert("depends_on".to_string(), Value::Array(addresses.collect()));
        }

        self.claim_id(id)?;
        let reference = ResourceRef::resource(R::RESOURCE_TYPE, id);
        self.resources
            .entry(R::RESOURCE_TYPE)
            .or_default()
            .insert(id.to_string(), Value::Object(body));

        tracing::debug!(stack = %self.name, address = %reference.address(), "Declared resource");
        Ok(reference)
    }

    pub fn add_data_source<D: TerraformDataSource>(
        &mut self,
        id: &str,
        data_source: &D,
    ) -> Result<ResourceRef> {
        let body = self.body_of(id, data_source)?;

        self.claim_id(id)?;
        let reference = ResourceRef::data(D::DATA_TYPE, id);
        self.data
            .entry(D::DATA_TYPE)
            .or_default()
            .insert(id.to_string(), Value::Object(body));

        tracing::debug!(stack = %self.name, address = %reference.address(), "Declared data source");
        Ok(reference)
    }

    pub fn add_output(&mut self, id: &str, output: &TerraformOutput) -> Result<()> {
        let body = serde_json::to_value(output)?;
        self.claim_id(id)?;
        self.outputs.insert(id.to_string(), body);
        Ok(())
    }

    /// Registers an asset to be copied into the stack's working directory.
    pub fn add_asset(&mut self, asset: TerraformAsset) -> Result<()> {
        self.claim_id(asset.id())?;
        self.assets.push(asset);
        Ok(())
    }

    /// Returns the body of a declared resource, if any.
    pub fn resource(&self, resource_type: &str, id: &str) -> Option<&Value> {
        self.resources.get(resource_type).and_then(|r| r.get(id))
    }

    /// Returns the body of a declared data source, if any.
    pub fn data_source(&self, data_type: &str, id: &str) -> Option<&Value> {
        self.data.get(data_type).and_then(|d| d.get(id))
    }

    pub fn output(&self, id: &str) -> Option<&Value> {
        self.outputs.get(id)
    }

    /// Addresses of every resource and data source, sorted.
    pub fn addresses(&self) -> Vec<String> {
        let resources = self.resources.iter().flat_map(|(ty, ids)| {
            ids.keys()
                .map(move |id| ResourceRef::resource(*ty, id.as_str()).address())
        });
        let data = self
            .data
            .iter()
            .flat_map(|(ty, ids)| ids.keys().map(move |id| ResourceRef::data(*ty, id.as_str()).address()));

        let mut addresses: Vec<String> = resources.chain(data).collect();
        addresses.sort();
        addresses
    }

    /// Renders the stack as a Terraform JSON document.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "//".to_string(),
            json!({
                "metadata": {
                    "backend": "local",
                    "stackName": self.name,
                    "version": SYNTH_VERSION,
                }
            }),
        );

        let mut terraform = Map::new();
        terraform.insert(
            "backend".to_string(),
            json!({ "local": { "path": format!("terraform.{}.tfstate", self.name) } }),
        );
        if !self.required_providers.is_empty() {
            terraform.insert(
                "required_providers".to_string(),
                json!(self.required_providers),
            );
        }
        root.insert("terraform".to_string(), Value::Object(terraform));

        if !self.providers.is_empty() {
            root.insert("provider".to_string(), json!(self.providers));
        }
        if !self.data.is_empty() {
            root.insert("data".to_string(), json!(self.data));
        }
        if !self.resources.is_empty() {
            root.insert("resource".to_string(), json!(self.resources));
        }
        if !self.outputs.is_empty() {
            root.insert("output".to_string(), json!(self.outputs));
        }

        Value::Object(root)
    }

    fn body_of<T: Serialize>(&self, id: &str, value: &T) -> Result<Map<String, Value>> {
        match serde_json::to_value(value)? {
            Value::Object(body) => Ok(body),
            _ => Err(InfraError::InvalidResourceBody { id: id.to_string() }),
        }
    }

    fn claim_id(&mut self, id: &str) -> Result<()> {
        validate_construct_id(id)?;
        if !self.construct_ids.insert(id.to_string()) {
            return Err(InfraError::DuplicateConstructId {
                stack: self.name.clone(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
