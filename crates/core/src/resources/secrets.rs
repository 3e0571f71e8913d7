use serde::Serialize;

use crate::synth::TerraformDataSource;

/// Lookup of an existing Secrets Manager secret by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSecretsmanagerSecret {
    pub name: String,
}

impl TerraformDataSource for DataSecretsmanagerSecret {
    const DATA_TYPE: &'static str = "aws_secretsmanager_secret";
}
