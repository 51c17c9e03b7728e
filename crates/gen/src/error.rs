//! Error types for module generation.
//!
//! Every error here is fatal to the whole run: a resource that cannot be
//! generated aborts generation instead of being skipped, so the CI manifest
//! never drifts from the set of modules that actually exist.

use std::path::PathBuf;

use snowgrant_schema::RegistryError;
use thiserror::Error;

/// Errors produced while reversing a schema field into a type expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The field's type has no configuration-language counterpart.
    #[error("unrecognized type {kind} for field `{field}`")]
    UnsupportedSchemaType { field: String, kind: &'static str },

    /// The field nests deeper than any real provider schema does.
    #[error("field `{field}` nests deeper than {limit} levels")]
    MaxNestingExceeded { field: String, limit: usize },
}

/// The primary error type for a generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("resource {resource}: {source}")]
    Type {
        resource: String,
        #[source]
        source: TypeError,
    },

    /// A schema field collides with a name the generated module defines itself.
    #[error("resource {resource}: field `{field}` collides with a generated name")]
    ReservedField { resource: String, field: String },

    #[error("resource {resource} declares no valid privileges")]
    EmptyPrivilegeSet { resource: String },

    #[error("I/O failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize module {module}: {source}")]
    Serialize {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
