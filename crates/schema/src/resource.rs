//! Grant resource definitions.

use std::collections::BTreeMap;

use crate::field::SchemaField;

/// Name of the field that carries the privilege; it is driven by iteration,
/// never by the caller.
pub const PRIVILEGE_FIELD: &str = "privilege";

/// Name of the field listing grantee roles.
pub const ROLES_FIELD: &str = "roles";

/// Name of the field listing grantee shares.
pub const SHARES_FIELD: &str = "shares";

/// One grant resource family: its name, the privileges it accepts and its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantResourceDefinition {
    /// Resource type name, e.g. `snowflake_table_grant`.
    pub resource_name: String,

    /// Privileges accepted by the resource. Order carries no meaning.
    pub valid_privileges: Vec<String>,

    /// Fields keyed by name.
    pub schema: BTreeMap<String, SchemaField>,
}

impl GrantResourceDefinition {
    /// Builds a definition, keying each field by its own name.
    pub fn new<P, F>(resource_name: impl Into<String>, privileges: P, fields: F) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator<Item = SchemaField>,
    {
        Self {
            resource_name: resource_name.into(),
            valid_privileges: privileges.into_iter().map(Into::into).collect(),
            schema: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }

    pub fn supports_shares(&self) -> bool {
        self.schema.contains_key(SHARES_FIELD)
    }

    pub fn supports_roles(&self) -> bool {
        self.schema.contains_key(ROLES_FIELD)
    }

    /// Name of the generated module directory: `snowflake_table_grant` becomes
    /// `snowflake-table-grant-all`.
    pub fn module_name(&self) -> String {
        format!("{}-all", self.resource_name).replace('_', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn table_grant() -> GrantResourceDefinition {
        GrantResourceDefinition::new(
            "snowflake_table_grant",
            ["SELECT", "INSERT"],
            [
                SchemaField::new("privilege", FieldKind::String),
                SchemaField::new("roles", FieldKind::string_set()),
                SchemaField::new("table_name", FieldKind::String),
            ],
        )
    }

    #[test]
    fn test_module_name() {
        assert_eq!(table_grant().module_name(), "snowflake-table-grant-all");
    }

    #[test]
    fn test_supports_flags() {
        let grant = table_grant();
        assert!(grant.supports_roles());
        assert!(!grant.supports_shares());
    }

    #[test]
    fn test_schema_keyed_by_field_name() {
        let grant = table_grant();
        assert_eq!(grant.schema.len(), 3);
        assert_eq!(grant.schema["table_name"].kind, FieldKind::String);
    }
}
