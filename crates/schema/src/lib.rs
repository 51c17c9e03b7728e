//! # snowgrant-schema
//!
//! The schema side of the grant-all module generator: a typed model of the
//! provider's grant resources and the registry that supplies them.
//!
//! The upstream provider describes each field with a loosely structured
//! descriptor (a type tag plus an optional `elem` whose meaning depends on
//! the tag). This crate validates that descriptor once, at the registry edge,
//! and hands the generator a closed [`FieldKind`] enum instead.
//!
//! ```rust
//! use snowgrant_schema::{GrantRegistry, JsonRegistry};
//!
//! let registry = JsonRegistry::builtin().unwrap();
//! let grants = registry.grant_resources().unwrap();
//! assert!(grants.iter().any(|g| g.resource_name == "snowflake_table_grant"));
//! ```

pub mod error;
pub mod field;
pub mod registry;
pub mod resource;

pub use error::RegistryError;
pub use field::{FieldKind, SchemaField};
pub use registry::{GrantRegistry, JsonRegistry};
pub use resource::{GrantResourceDefinition, PRIVILEGE_FIELD, ROLES_FIELD, SHARES_FIELD};
