//! Per-privilege override support.
//!
//! Every generated module accepts a `per_privilege_grants` map from privilege
//! to extra roles and shares. For each privilege the resource receives the
//! union of the module-wide grantees and that privilege's extras, so no
//! privilege ever loses the module-wide grant.

use snowgrant_schema::{GrantResourceDefinition, ROLES_FIELD, SHARES_FIELD};

use crate::expr::{Expr, Function};

/// Name of the generated override variable.
pub const PER_PRIVILEGE_GRANTS: &str = "per_privilege_grants";

/// The override variable's type and its per-privilege fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideType {
    /// Grantee collections supported by the resource, shares before roles.
    pub collections: Vec<&'static str>,
    /// e.g. `map(object({shares = list(string),roles = list(string)}))`
    pub type_expression: String,
    /// e.g. `{ shares = [], roles = [] }`
    pub default_expression: String,
}

impl OverrideType {
    /// The fallback object used when a privilege has no override entry.
    pub fn default_value(&self) -> Expr {
        Expr::Object(
            self.collections
                .iter()
                .map(|name| (name.to_string(), Expr::EmptyList))
                .collect(),
        )
    }
}

/// Computes the override variable type for a resource.
///
/// A resource with neither `shares` nor `roles` still gets a (useless) object
/// type with no members.
pub fn build_override_type(def: &GrantResourceDefinition) -> OverrideType {
    let mut collections = Vec::new();
    if def.supports_shares() {
        collections.push(SHARES_FIELD);
    }
    if def.supports_roles() {
        collections.push(ROLES_FIELD);
    }

    let inner: Vec<String> = collections
        .iter()
        .map(|name| format!("{name} = list(string)"))
        .collect();

    let mut override_type = OverrideType {
        collections,
        type_expression: format!("map(object({{{}}}))", inner.join(",")),
        default_expression: String::new(),
    };
    override_type.default_expression = override_type.default_value().to_string();
    override_type
}

/// `setunion(var.<field>, lookup(var.per_privilege_grants, each.value, <default>).<field>)`
pub fn build_union_expression(field: &str, default: &Expr) -> Expr {
    let per_privilege = Expr::call(
        Function::Lookup,
        vec![Expr::var(PER_PRIVILEGE_GRANTS), Expr::EachValue, default.clone()],
    )
    .attr(field);

    Expr::call(Function::SetUnion, vec![Expr::var(field), per_privilege])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EvalContext;
    use serde_json::json;
    use snowgrant_schema::{FieldKind, SchemaField};

    fn grant(fields: &[&str]) -> GrantResourceDefinition {
        GrantResourceDefinition::new(
            "snowflake_table_grant",
            ["SELECT", "INSERT"],
            fields
                .iter()
                .map(|name| SchemaField::new(*name, FieldKind::string_set())),
        )
    }

    #[test]
    fn test_roles_only() {
        let override_type = build_override_type(&grant(&["roles"]));
        assert_eq!(override_type.type_expression, "map(object({roles = list(string)}))");
        assert_eq!(override_type.default_expression, "{ roles = [] }");
    }

    #[test]
    fn test_shares_precede_roles() {
        let override_type = build_override_type(&grant(&["roles", "shares"]));
        assert_eq!(
            override_type.type_expression,
            "map(object({shares = list(string),roles = list(string)}))"
        );
        assert_eq!(override_type.default_expression, "{ shares = [], roles = [] }");
    }

    #[test]
    fn test_neither_collection() {
        let override_type = build_override_type(&grant(&["database_name"]));
        assert_eq!(override_type.type_expression, "map(object({}))");
        assert_eq!(override_type.default_expression, "{  }");
    }

    #[test]
    fn test_union_expression_text() {
        let override_type = build_override_type(&grant(&["roles", "shares"]));
        let expr = build_union_expression("roles", &override_type.default_value());
        assert_eq!(
            expr.to_string(),
            "setunion(var.roles, lookup(var.per_privilege_grants, each.value, { shares = [], roles = [] }).roles)"
        );
    }

    #[test]
    fn test_union_keeps_module_wide_grantees() {
        let override_type = build_override_type(&grant(&["roles"]));
        let expr = build_union_expression("roles", &override_type.default_value());

        let ctx = EvalContext::new()
            .with_var("roles", json!(["r1"]))
            .with_var(PER_PRIVILEGE_GRANTS, json!({"SELECT": {"roles": ["r2"]}}));

        let select = ctx.clone().with_each_value(json!("SELECT"));
        assert_eq!(expr.evaluate(&select).unwrap(), json!(["r1", "r2"]));

        let insert = ctx.with_each_value(json!("INSERT"));
        assert_eq!(expr.evaluate(&insert).unwrap(), json!(["r1"]));
    }

    #[test]
    fn test_union_with_empty_overrides() {
        let override_type = build_override_type(&grant(&["roles", "shares"]));
        let expr = build_union_expression("shares", &override_type.default_value());

        let ctx = EvalContext::new()
            .with_var("shares", json!(["s1", "s2"]))
            .with_var(PER_PRIVILEGE_GRANTS, json!({}))
            .with_each_value(json!("USAGE"));
        assert_eq!(expr.evaluate(&ctx).unwrap(), json!(["s1", "s2"]));
    }
}
