//! Errors raised while loading a schema registry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by a [`GrantRegistry`](crate::GrantRegistry).
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry snapshot could not be read.
    #[error("failed to read registry {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry snapshot is not valid JSON or does not match the descriptor format.
    #[error("failed to parse registry: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field descriptor breaks the type/elem convention.
    #[error("resource {resource}: malformed field `{field}`: {reason}")]
    MalformedField {
        resource: String,
        field: String,
        reason: String,
    },
}
