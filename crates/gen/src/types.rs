//! Reverses schema fields into configuration-language type expressions.
//!
//! | Field kind | Type expression |
//! |------------|-----------------|
//! | `Boolean` | `bool` |
//! | `String` | `string` |
//! | `Set(T)` | `set(T)` |
//! | `ListOfObject{a, b}` | `list(object({ a = A, b = B }))` |
//!
//! Object members are always emitted sorted by name so that generated modules
//! are byte-identical across runs.

use snowgrant_schema::{FieldKind, SchemaField};

use crate::error::TypeError;

/// Deepest nesting accepted before reversal gives up.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Returns the type expression for a schema field.
pub fn reverse(field: &SchemaField) -> Result<String, TypeError> {
    reverse_kind(&field.kind, &field.name, 0)
}

fn reverse_kind(kind: &FieldKind, path: &str, depth: usize) -> Result<String, TypeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(TypeError::MaxNestingExceeded {
            field: path.to_string(),
            limit: MAX_NESTING_DEPTH,
        });
    }

    match kind {
        FieldKind::Boolean => Ok("bool".to_string()),
        FieldKind::String => Ok("string".to_string()),
        FieldKind::Set(element) => Ok(format!("set({})", reverse_kind(element, path, depth + 1)?)),
        FieldKind::ListOfObject(fields) => {
            let mut members = fields
                .iter()
                .map(|field| {
                    let member_path = format!("{path}.{}", field.name);
                    let ttype = reverse_kind(&field.kind, &member_path, depth + 1)?;
                    Ok((field.name.as_str(), ttype))
                })
                .collect::<Result<Vec<_>, TypeError>>()?;
            members.sort_by(|a, b| a.0.cmp(b.0));

            let members: Vec<String> = members
                .into_iter()
                .map(|(name, ttype)| format!("{name} = {ttype}"))
                .collect();
            Ok(format!("list(object({{ {} }}))", members.join(", ")))
        }
        FieldKind::Int | FieldKind::Float | FieldKind::Map => {
            Err(TypeError::UnsupportedSchemaType {
                field: path.to_string(),
                kind: kind.type_name(),
            })
        }
    }
}
