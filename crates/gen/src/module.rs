//! The generated module document.
//!
//! Serialized as Terraform JSON configuration (`main.tf.json`). All maps are
//! ordered so rendering is deterministic.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Attribute name to value, for one resource block.
pub type ResourceBody = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDocument {
    #[serde(rename = "//", skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(rename = "variable", skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, Variable>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub locals: BTreeMap<String, Value>,

    /// resource type: resource label: attributes
    #[serde(rename = "resource", skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, BTreeMap<String, ResourceBody>>,

    pub terraform: TerraformBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    #[serde(rename = "type")]
    pub ttype: String,
    pub description: String,
    /// Serialized as `null` when unset, which makes the variable required.
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerraformBlock {
    pub required_providers: BTreeMap<String, ProviderRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRequirement {
    pub source: String,
    pub version: String,
}

impl ModuleDocument {
    /// The sorted privilege list stored in `locals.privileges`, if any.
    pub fn privileges(&self) -> Vec<&str> {
        match self.locals.get("privileges") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_layout() {
        let doc = ModuleDocument {
            comment: "generated".to_string(),
            variables: BTreeMap::from([(
                "roles".to_string(),
                Variable {
                    ttype: "set(string)".to_string(),
                    description: "Grantees.".to_string(),
                    default: None,
                },
            )]),
            locals: BTreeMap::from([("privileges".to_string(), json!(["SELECT"]))]),
            resources: BTreeMap::new(),
            terraform: TerraformBlock {
                required_providers: BTreeMap::from([(
                    "snowflake".to_string(),
                    ProviderRequirement {
                        source: "chanzuckerberg/snowflake".to_string(),
                        version: ">= 0.20.0".to_string(),
                    },
                )]),
            },
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["//"], json!("generated"));
        assert_eq!(value["variable"]["roles"]["type"], json!("set(string)"));
        assert_eq!(value["variable"]["roles"]["default"], Value::Null);
        assert!(value.get("resource").is_none());
        assert_eq!(
            value["terraform"]["required_providers"]["snowflake"]["version"],
            json!(">= 0.20.0")
        );
        assert_eq!(doc.privileges(), vec!["SELECT"]);
    }
}
