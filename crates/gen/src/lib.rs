//! # snowgrant-gen
//!
//! Generates one Terraform "grant-all" module per Snowflake grant resource.
//!
//! The provider allows only one grant resource per object and privilege
//! combination, which makes "grant everything to these roles" awkward to
//! express by hand. A generated module takes the resource's own inputs plus
//! an optional `per_privilege_grants` map, and creates one grant per valid
//! privilege with `for_each`.
//!
//! ## Pipeline
//!
//! 1. [`types::reverse`] turns each schema field into a type expression.
//! 2. [`merge`] builds the `per_privilege_grants` type and the union
//!    expressions that combine module-wide and per-privilege grantees.
//! 3. [`assemble::assemble`] combines both into a [`ModuleDocument`].
//! 4. [`writer::ModuleWriter`] renders and writes `main.tf.json` and the test stub.
//! 5. [`ci::CiManifest`] records the module names for CI.
//!
//! [`Generator`] drives the whole pipeline over a registry.
//!
//! ```rust
//! use snowgrant_gen::assemble::assemble;
//! use snowgrant_schema::{FieldKind, GrantResourceDefinition, SchemaField};
//!
//! let grant = GrantResourceDefinition::new(
//!     "snowflake_view_grant",
//!     ["SELECT", "REFERENCES"],
//!     [
//!         SchemaField::new("privilege", FieldKind::String),
//!         SchemaField::new("roles", FieldKind::string_set()),
//!     ],
//! );
//! let doc = assemble(&grant).unwrap();
//! assert_eq!(doc.privileges(), vec!["REFERENCES", "SELECT"]);
//! ```

pub mod assemble;
pub mod ci;
pub mod config;
pub mod error;
pub mod expr;
pub mod generator;
pub mod merge;
pub mod module;
pub mod stub;
pub mod types;
pub mod writer;

pub use config::{GenConfig, init_logging};
pub use error::{GenerateError, Result, TypeError};
pub use generator::{GenerationReport, Generator};
pub use module::ModuleDocument;
