//! Schema registries.
//!
//! A registry supplies every grant resource the generator should produce a
//! module for. [`JsonRegistry`] reads a snapshot in the provider's descriptor
//! format:
//!
//! ```json
//! {
//!   "snowflake_database_grant": {
//!     "valid_privileges": ["USAGE", "MODIFY"],
//!     "schema": {
//!       "database_name": { "type": "TypeString", "description": "..." },
//!       "roles": { "type": "TypeSet", "description": "...", "elem": { "type": "TypeString" } }
//!     }
//!   }
//! }
//! ```
//!
//! `elem` is a nested field descriptor for `TypeSet` and `TypeMap`, and a
//! nested resource (`{ "schema": { ... } }`) for `TypeList`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::RegistryError;
use crate::field::{FieldKind, SchemaField};
use crate::resource::GrantResourceDefinition;

/// Snowflake grant catalogue shipped with the generator.
const BUILTIN_CATALOGUE: &str = include_str!("../data/snowflake_grants.json");

/// A source of grant resource definitions.
pub trait GrantRegistry {
    /// Returns every grant resource known to the registry.
    fn grant_resources(&self) -> Result<Vec<GrantResourceDefinition>, RegistryError>;
}

/// A registry loaded from a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct JsonRegistry {
    resources: Vec<GrantResourceDefinition>,
}

impl JsonRegistry {
    /// Parses a registry snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, RawResource> = serde_json::from_str(json)?;
        let resources = raw
            .into_iter()
            .map(|(name, resource)| resource.into_definition(name))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(resources = resources.len(), "Loaded grant registry");
        Ok(Self { resources })
    }

    /// Reads and parses a registry snapshot from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The embedded Snowflake grant catalogue.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json_str(BUILTIN_CATALOGUE)
    }
}

impl GrantRegistry for JsonRegistry {
    fn grant_resources(&self) -> Result<Vec<GrantResourceDefinition>, RegistryError> {
        Ok(self.resources.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RawResource {
    valid_privileges: Vec<String>,
    schema: BTreeMap<String, RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    kind: RawType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    elem: Option<Box<RawElem>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum RawType {
    TypeBool,
    TypeInt,
    TypeFloat,
    TypeString,
    TypeList,
    TypeMap,
    TypeSet,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawElem {
    Resource { schema: BTreeMap<String, RawField> },
    Field(RawField),
}

impl RawResource {
    fn into_definition(self, name: String) -> Result<GrantResourceDefinition, RegistryError> {
        let fields = self
            .schema
            .into_iter()
            .map(|(field_name, raw)| {
                let path = field_name.clone();
                raw.into_field(&name, field_name, &path)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GrantResourceDefinition::new(
            name,
            self.valid_privileges,
            fields,
        ))
    }
}

impl RawField {
    /// `path` is the dotted location used in diagnostics; `name` is the raw key.
    fn into_field(
        self,
        resource: &str,
        name: String,
        path: &str,
    ) -> Result<SchemaField, RegistryError> {
        let description = self.description.clone();
        let kind = self.into_kind(resource, path)?;
        Ok(SchemaField {
            name,
            description,
            kind,
        })
    }

    fn into_kind(self, resource: &str, path: &str) -> Result<FieldKind, RegistryError> {
        let malformed = |reason: &str| RegistryError::MalformedField {
            resource: resource.to_string(),
            field: path.to_string(),
            reason: reason.to_string(),
        };

        match (self.kind, self.elem.map(|elem| *elem)) {
            (RawType::TypeBool, None) => Ok(FieldKind::Boolean),
            (RawType::TypeString, None) => Ok(FieldKind::String),
            (RawType::TypeInt, None) => Ok(FieldKind::Int),
            (RawType::TypeFloat, None) => Ok(FieldKind::Float),
            (RawType::TypeBool | RawType::TypeString | RawType::TypeInt | RawType::TypeFloat, Some(_)) => {
                Err(malformed("elem is only valid on TypeSet, TypeList and TypeMap"))
            }
            (RawType::TypeMap, _) => Ok(FieldKind::Map),
            (RawType::TypeSet, Some(RawElem::Field(inner))) => {
                Ok(FieldKind::Set(Box::new(inner.into_kind(resource, path)?)))
            }
            (RawType::TypeSet, Some(RawElem::Resource { .. })) => {
                Err(malformed("TypeSet elem must be a field, not a nested resource"))
            }
            (RawType::TypeList, Some(RawElem::Resource { schema })) => {
                let fields = schema
                    .into_iter()
                    .map(|(name, raw)| {
                        let member_path = format!("{path}.{name}");
                        raw.into_field(resource, name, &member_path)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldKind::ListOfObject(fields))
            }
            (RawType::TypeList, Some(RawElem::Field(_))) => {
                Err(malformed("TypeList elem must be a nested resource"))
            }
            (RawType::TypeSet | RawType::TypeList, None) => Err(malformed("missing elem")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_and_list_fields() {
        let json = r#"{
          "snowflake_function_grant": {
            "valid_privileges": ["USAGE"],
            "schema": {
              "roles": { "type": "TypeSet", "description": "Grantees.", "elem": { "type": "TypeString" } },
              "arguments": {
                "type": "TypeList",
                "elem": { "schema": {
                  "type": { "type": "TypeString" },
                  "name": { "type": "TypeString" }
                } }
              }
            }
          }
        }"#;

        let registry = JsonRegistry::from_json_str(json).unwrap();
        let grants = registry.grant_resources().unwrap();
        assert_eq!(grants.len(), 1);

        let grant = &grants[0];
        assert_eq!(grant.schema["roles"].kind, FieldKind::string_set());
        assert_eq!(grant.schema["roles"].description, "Grantees.");

        let FieldKind::ListOfObject(fields) = &grant.schema["arguments"].kind else {
            panic!("arguments should be a list of objects");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "type"]);
    }

    #[test]
    fn test_dotted_keys_keep_their_name() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": {
              "a.b": { "type": "TypeString" },
              "arguments": {
                "type": "TypeList",
                "elem": { "schema": { "x.y": { "type": "TypeString" } } }
              }
            }
          }
        }"#;

        let grants = JsonRegistry::from_json_str(json)
            .unwrap()
            .grant_resources()
            .unwrap();
        let keys: Vec<&str> = grants[0].schema.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a.b", "arguments"]);
        assert_eq!(grants[0].schema["a.b"].name, "a.b");

        let FieldKind::ListOfObject(fields) = &grants[0].schema["arguments"].kind else {
            panic!("arguments should be a list of objects");
        };
        assert_eq!(fields[0].name, "x.y");
    }

    #[test]
    fn test_nested_malformed_field_reports_dotted_path() {
        let json = r#"{
          "snowflake_function_grant": {
            "valid_privileges": ["USAGE"],
            "schema": {
              "arguments": {
                "type": "TypeList",
                "elem": { "schema": { "tags": { "type": "TypeSet" } } }
              }
            }
          }
        }"#;

        match JsonRegistry::from_json_str(json).unwrap_err() {
            RegistryError::MalformedField { field, .. } => assert_eq!(field, "arguments.tags"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_set_without_elem_is_malformed() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": { "roles": { "type": "TypeSet" } }
          }
        }"#;

        let err = JsonRegistry::from_json_str(json).unwrap_err();
        match err {
            RegistryError::MalformedField { resource, field, .. } => {
                assert_eq!(resource, "snowflake_view_grant");
                assert_eq!(field, "roles");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_of_primitives_is_malformed() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": { "tags": { "type": "TypeList", "elem": { "type": "TypeString" } } }
          }
        }"#;

        assert!(matches!(
            JsonRegistry::from_json_str(json),
            Err(RegistryError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_scalar_with_elem_is_malformed() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": { "view_name": { "type": "TypeString", "elem": { "type": "TypeString" } } }
          }
        }"#;

        assert!(JsonRegistry::from_json_str(json).is_err());
    }

    #[test]
    fn test_unknown_type_tag_fails_to_parse() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": { "view_name": { "type": "TypeInvalid" } }
          }
        }"#;

        assert!(matches!(
            JsonRegistry::from_json_str(json),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn test_int_is_kept_for_the_generator_to_reject() {
        let json = r#"{
          "snowflake_view_grant": {
            "valid_privileges": ["SELECT"],
            "schema": { "retries": { "type": "TypeInt" } }
          }
        }"#;

        let grants = JsonRegistry::from_json_str(json)
            .unwrap()
            .grant_resources()
            .unwrap();
        assert_eq!(grants[0].schema["retries"].kind, FieldKind::Int);
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(
            JsonRegistry::from_path(&path),
            Err(RegistryError::Io { .. })
        ));
    }

    #[test]
    fn test_builtin_catalogue_loads() {
        let grants = JsonRegistry::builtin().unwrap().grant_resources().unwrap();
        assert!(grants.len() >= 8);
        for grant in &grants {
            assert!(!grant.valid_privileges.is_empty(), "{}", grant.resource_name);
            assert!(grant.schema.contains_key("privilege"), "{}", grant.resource_name);
            assert!(grant.supports_roles(), "{}", grant.resource_name);
        }
    }
}
