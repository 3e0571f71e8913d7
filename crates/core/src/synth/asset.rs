use std::path::{Path, PathBuf};

use md5::{Digest as _, Md5};

use crate::error::{InfraError, Result};

/// A file that is copied next to the synthesized stack.
///
/// The content hash becomes part of the asset path, so a changed artifact
/// produces a new path and Terraform re-uploads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformAsset {
    id: String,
    source: PathBuf,
    file_name: String,
    hash: String,
}

impl TerraformAsset {
    /// Reads and hashes a file asset.
    pub fn from_file(id: impl Into<String>, source: impl AsRef<Path>) -> Result<Self> {
        let source = source.as_ref();
        if !source.is_file() {
            return Err(InfraError::AssetNotFound {
                path: source.to_path_buf(),
            });
        }

        let bytes = std::fs::read(source)?;
        let mut hasher = Md5::new();
        hasher.update(&bytes);
        let hash = format!("{:X}", hasher.finalize());

        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| InfraError::AssetNotFound {
                path: source.to_path_buf(),
            })?;

        Ok(Self {
            id: id.into(),
            source: source.to_path_buf(),
            file_name,
            hash,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Uppercase hex MD5 of the file content.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Path of the copied asset, relative to the stack's working directory.
    pub fn path(&self) -> String {
        format!("assets/{}/{}/{}", self.id, self.hash, self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_asset_hash_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "StarterLambda.zip", b"hello");

        let asset = TerraformAsset::from_file("asset-user-services-dev-dev", &path).unwrap();

        // md5("hello")
        assert_eq!(asset.hash(), "5D41402ABC4B2A76B9719D911017C592");
        assert_eq!(asset.file_name(), "StarterLambda.zip");
        assert_eq!(
            asset.path(),
            "assets/asset-user-services-dev-dev/5D41402ABC4B2A76B9719D911017C592/StarterLambda.zip"
        );
    }

    #[test]
    fn test_asset_hash_changes_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_artifact(dir.path(), "a.zip", b"one");
        let second = write_artifact(dir.path(), "b.zip", b"two");

        let a = TerraformAsset::from_file("a", &first).unwrap();
        let b = TerraformAsset::from_file("b", &second).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let err = TerraformAsset::from_file("missing", dir.path().join("nope.zip")).unwrap_err();
        assert!(matches!(err, InfraError::AssetNotFound { .. }));
    }

    #[test]
    fn test_directory_is_not_a_file_asset() {
        let dir = tempfile::tempdir().unwrap();
        let err = TerraformAsset::from_file("dir", dir.path()).unwrap_err();
        assert!(matches!(err, InfraError::AssetNotFound { .. }));
    }
}
