//! Synth output on disk (Imperative Shell).
//!
//! Layout:
//!
//! ```text
//! <outdir>/manifest.json
//! <outdir>/stacks/<stack>/cdk.tf.json
//! <outdir>/stacks/<stack>/assets/<asset-id>/<HASH>/<file>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{App, Stack, MANIFEST_FILE_NAME, STACK_FILE_NAME, SYNTH_VERSION};
use crate::error::Result;

/// Index of every synthesized stack in an output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub stacks: BTreeMap<String, StackManifest>,
}

/// Manifest entry for a single stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackManifest {
    pub name: String,
    pub construct_path: String,
    pub synthesized_stack_path: String,
    pub working_directory: String,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl StackManifest {
    fn for_stack(name: &str) -> Self {
        Self {
            name: name.to_string(),
            construct_path: name.to_string(),
            synthesized_stack_path: format!("stacks/{}/{}", name, STACK_FILE_NAME),
            working_directory: format!("stacks/{}", name),
            annotations: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

/// Returns the working directory of a stack inside `outdir`.
pub fn stack_dir(outdir: &Path, stack_name: &str) -> PathBuf {
    outdir.join("stacks").join(stack_name)
}

/// Writes every stack of the app and merges them into the manifest.
///
/// Stacks synthesized by earlier runs and not part of `app` stay listed.
pub fn write_app(app: &App, outdir: &Path) -> Result<Manifest> {
    let mut manifest = read_manifest(outdir)?.unwrap_or_else(|| Manifest {
        version: SYNTH_VERSION.to_string(),
        stacks: BTreeMap::new(),
    });
    manifest.version = SYNTH_VERSION.to_string();

    for stack in app.stacks() {
        write_stack(stack, outdir)?;
        manifest
            .stacks
            .insert(stack.name().to_string(), StackManifest::for_stack(stack.name()));
    }

    write_manifest(&manifest, outdir)?;
    tracing::info!(
        outdir = %outdir.display(),
        stacks = app.stacks().len(),
        "Synthesized app"
    );
    Ok(manifest)
}

/// Loads a previously synthesized stack document, if present.
pub fn read_stack(outdir: &Path, stack_name: &str) -> Result<Option<Value>> {
    let path = stack_dir(outdir, stack_name).join(STACK_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Deletes a stack's working directory and its manifest entry.
///
/// Returns false when there was nothing to remove.
pub fn remove_stack(outdir: &Path, stack_name: &str) -> Result<bool> {
    let dir = stack_dir(outdir, stack_name);
    let existed = dir.exists();
    if existed {
        fs::remove_dir_all(&dir)?;
    }

    if let Some(mut manifest) = read_manifest(outdir)? {
        if manifest.stacks.remove(stack_name).is_some() {
            write_manifest(&manifest, outdir)?;
        }
    }

    if existed {
        tracing::info!(stack = stack_name, "Removed synthesized stack");
    }
    Ok(existed)
}

fn write_stack(stack: &Stack, outdir: &Path) -> Result<()> {
    let dir = stack_dir(outdir, stack.name());
    fs::create_dir_all(&dir)?;

    // Old asset hashes would otherwise pile up next to the current ones.
    let assets_dir = dir.join("assets");
    if assets_dir.exists() {
        fs::remove_dir_all(&assets_dir)?;
    }

    for asset in stack.assets() {
        let target = dir.join(asset.path());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(asset.source(), &target)?;
    }

    let document = serde_json::to_string_pretty(&stack.to_json())?;
    fs::write(dir.join(STACK_FILE_NAME), document)?;

    tracing::debug!(
        stack = stack.name(),
        assets = stack.assets().len(),
        "Wrote stack"
    );
    Ok(())
}

fn read_manifest(outdir: &Path) -> Result<Option<Manifest>> {
    let path = outdir.join(MANIFEST_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

fn write_manifest(manifest: &Manifest, outdir: &Path) -> Result<()> {
    fs::create_dir_all(outdir)?;
    fs::write(
        outdir.join(MANIFEST_FILE_NAME),
        serde_json::to_string_pretty(manifest)?,
    )?;
    Ok(())
}
