//! Terraform document model and synthesis.
//!
//! A [`Stack`] collects resource, data source and output declarations and
//! renders them as a `cdk.tf.json` document. Declarations reference each
//! other through interpolation tokens produced by [`ResourceRef::attr`].

mod app;
mod asset;
mod output;
mod reference;
mod stack;

pub use app::App;
pub use asset::TerraformAsset;
pub use output::{read_stack, remove_stack, stack_dir, write_app, Manifest, StackManifest};
pub use reference::{validate_construct_id, RefKind, ResourceRef};
pub use stack::{Stack, TerraformDataSource, TerraformOutput, TerraformProvider, TerraformResource};

/// Version stamped into synthesized metadata.
pub const SYNTH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of a synthesized stack document.
pub const STACK_FILE_NAME: &str = "cdk.tf.json";

/// File name of the synth manifest.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
