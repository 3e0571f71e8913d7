use serde::Serialize;

use crate::synth::TerraformResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Bucket {
    pub bucket_prefix: String,
}

impl TerraformResource for S3Bucket {
    const RESOURCE_TYPE: &'static str = "aws_s3_bucket";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Object {
    pub bucket: String,
    pub key: String,
    /// Local path, relative to the stack's working directory.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl TerraformResource for S3Object {
    const RESOURCE_TYPE: &'static str = "aws_s3_object";
}
