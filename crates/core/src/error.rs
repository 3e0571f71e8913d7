//! Error types for declaring and synthesizing stacks.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the core crate.
pub type Result<T> = std::result::Result<T, InfraError>;

/// Errors that can occur while declaring or synthesizing stacks.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Construct '{id}' is already declared in stack '{stack}'")]
    DuplicateConstructId { stack: String, id: String },

    #[error("Invalid construct id '{0}': expected letters, digits, '_' or '-', not starting with a digit or '-'")]
    InvalidConstructId(String),

    #[error("Stack '{0}' is already part of the app")]
    DuplicateStack(String),

    #[error("Asset file not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    #[error("Resource '{id}' did not serialize to a JSON object")]
    InvalidResourceBody { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_construct_id_display() {
        let error = InfraError::DuplicateConstructId {
            stack: "backend-np-infra-dev".to_string(),
            id: "Users-nonprod".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Construct 'Users-nonprod' is already declared in stack 'backend-np-infra-dev'"
        );
    }

    #[test]
    fn test_asset_not_found_display() {
        let error = InfraError::AssetNotFound {
            path: PathBuf::from("assets/StarterLambda.zip"),
        };
        assert_eq!(
            error.to_string(),
            "Asset file not found: assets/StarterLambda.zip"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: InfraError = io.into();
        assert_eq!(error.to_string(), "IO error: denied");
    }
}
