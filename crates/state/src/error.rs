use std::path::PathBuf;

use busters_model::ModelError;
use thiserror::Error;

/// Failures reading or updating the user store and catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("user id {0:?} not found")]
    UnknownUser(String),

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("invalid preferences: {}", join(.0))]
    Invalid(Vec<ModelError>),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

fn join(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
