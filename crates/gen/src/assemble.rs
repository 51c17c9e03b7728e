//! Builds a [`ModuleDocument`] from a grant resource definition.
//!
//! Assembly is pure: it never touches the filesystem, so a resource that
//! fails here leaves no trace on disk.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use snowgrant_schema::{GrantResourceDefinition, PRIVILEGE_FIELD, ROLES_FIELD, SHARES_FIELD};
use tracing::{debug, info};

use crate::error::{GenerateError, Result};
use crate::expr::{Expr, Function};
use crate::merge::{OverrideType, PER_PRIVILEGE_GRANTS, build_override_type, build_union_expression};
use crate::module::{ModuleDocument, ProviderRequirement, ResourceBody, TerraformBlock, Variable};
use crate::types::reverse;

pub const HEADER_COMMENT: &str = "NOTE: Generated by snowgrant-gen. Changes made directly to this file will be overwritten, so improve the generator instead.
The provider accepts only one grant resource per (object, on_future, with_grant_option) combination. Granting ALL to one role through a single resource would therefore block granting a subset of those privileges to another role, so this module grants each privilege through its own resource instead.";

pub const PROVIDER_NAME: &str = "snowflake";
pub const PROVIDER_SOURCE: &str = "chanzuckerberg/snowflake";
pub const PROVIDER_VERSION: &str = ">= 0.20.0";

/// Resource attribute driving iteration over the privileges.
pub const FOR_EACH: &str = "for_each";

/// Schema field names that would collide with what the generator emits.
const RESERVED_FIELDS: [&str; 2] = [PER_PRIVILEGE_GRANTS, FOR_EACH];

/// Label of the single `for_each` resource in every module.
pub const RESOURCE_LABEL: &str = "all";

const PER_PRIVILEGE_DESCRIPTION: &str = "A map of privileges to authorized roles and shares. Privileges must be UPPER case.
This allows you to authorize extra roles/shares for specific privileges.";

/// Assembles the module for one grant resource.
pub fn assemble(def: &GrantResourceDefinition) -> Result<ModuleDocument> {
    let resource = def.resource_name.as_str();
    info!(resource = %resource, "Assembling module");

    if def.valid_privileges.is_empty() {
        return Err(GenerateError::EmptyPrivilegeSet {
            resource: resource.to_string(),
        });
    }

    if let Some(field) = RESERVED_FIELDS
        .iter()
        .find(|name| def.schema.contains_key(**name))
    {
        return Err(GenerateError::ReservedField {
            resource: resource.to_string(),
            field: field.to_string(),
        });
    }

    let mut privileges = def.valid_privileges.clone();
    privileges.sort();
    privileges.dedup();

    let mut variables = BTreeMap::new();
    for (name, field) in &def.schema {
        if name == PRIVILEGE_FIELD {
            continue;
        }

        let ttype = reverse(field).map_err(|source| GenerateError::Type {
            resource: resource.to_string(),
            source,
        })?;
        debug!(resource = %resource, field = %name, ttype = %ttype, "Reversed field type");

        variables.insert(
            name.clone(),
            Variable {
                ttype,
                description: field.description.clone(),
                default: None,
            },
        );
    }

    let override_type = build_override_type(def);
    variables.insert(
        PER_PRIVILEGE_GRANTS.to_string(),
        Variable {
            ttype: override_type.type_expression.clone(),
            description: PER_PRIVILEGE_DESCRIPTION.to_string(),
            default: Some(json!({})),
        },
    );

    let resources = BTreeMap::from([(
        resource.to_string(),
        BTreeMap::from([(RESOURCE_LABEL.to_string(), resource_body(def, &override_type))]),
    )]);

    Ok(ModuleDocument {
        comment: HEADER_COMMENT.to_string(),
        variables,
        locals: BTreeMap::from([("privileges".to_string(), json!(privileges))]),
        resources,
        terraform: TerraformBlock {
            required_providers: BTreeMap::from([(
                PROVIDER_NAME.to_string(),
                ProviderRequirement {
                    source: PROVIDER_SOURCE.to_string(),
                    version: PROVIDER_VERSION.to_string(),
                },
            )]),
        },
    })
}

fn resource_body(def: &GrantResourceDefinition, override_type: &OverrideType) -> ResourceBody {
    let mut body = ResourceBody::new();
    let mut set = |name: &str, expr: Expr| {
        body.insert(name.to_string(), Value::String(expr.interpolate()));
    };

    set(
        FOR_EACH,
        Expr::call(Function::ToSet, vec![Expr::local("privileges")]),
    );
    set(PRIVILEGE_FIELD, Expr::EachValue);

    let fallback = override_type.default_value();
    for name in def.schema.keys() {
        match name.as_str() {
            PRIVILEGE_FIELD => {}
            ROLES_FIELD | SHARES_FIELD => set(name.as_str(), build_union_expression(name, &fallback)),
            _ => set(name.as_str(), Expr::var(name.as_str())),
        }
    }

    body
}
