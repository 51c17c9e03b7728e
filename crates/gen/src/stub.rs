//! Test stub written next to every generated module.
//!
//! The stub is a fixed terratest template; the resource name only feeds the
//! test function name.

const TEMPLATE: &str = r#"package test

import (
	"testing"

	"github.com/gruntwork-io/terratest/modules/terraform"
)

func Test{{NAME}}(t *testing.T) {
	options := &terraform.Options{
		TerraformDir: ".",
	}
	terraform.Init(t, options)
}
"#;

/// File name of the stub inside a module directory.
pub const TEST_STUB_FILE: &str = "module_test.go";

/// Renders the stub for `resource_name`, e.g. `snowflake_table_grant` yields
/// `TestSnowflakeTableGrantAll`.
pub fn render_test_stub(resource_name: &str) -> String {
    TEMPLATE.replace("{{NAME}}", &format!("{}All", camel_case(resource_name)))
}

fn camel_case(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
