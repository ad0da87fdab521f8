//! Built-in expression hierarchy.

use crate::types::{Schema, VariantSpec};

/// Returns the expression hierarchy generated when no schema file is given.
#[must_use]
pub fn expr_schema() -> Schema {
    Schema::new("Expr")
        .with_variant(
            VariantSpec::new("Binary")
                .with_field("owned-node", "left")
                .with_field("borrowed-token-ref", "op")
                .with_field("owned-node", "right"),
        )
        .with_variant(VariantSpec::new("Grouping").with_field("owned-node", "expression"))
        .with_variant(VariantSpec::new("Literal").with_field("opaque-value", "value"))
        .with_variant(
            VariantSpec::new("Unary")
                .with_field("borrowed-token-ref", "op")
                .with_field("owned-node", "right"),
        )
        .with_variant(
            VariantSpec::new("Call")
                .with_field("owned-node", "callee")
                .with_field("borrowed-token-ref", "paren")
                .with_field("owned-node-sequence", "args"),
        )
        .with_variant(VariantSpec::new("Variable").with_field("borrowed-token-ref", "label"))
        .with_variant(
            VariantSpec::new("Ternary")
                .with_field("owned-node", "condition")
                .with_field("owned-node", "true_case")
                .with_field("owned-node", "false_case"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::validation::validate_schema;

    #[test]
    fn test_expr_schema_is_valid() {
        let schema = expr_schema();
        assert!(validate_schema(&schema).is_ok());
        assert_eq!(schema.header_name, "expr");
    }

    #[test]
    fn test_expr_schema_variant_order() {
        let names: Vec<_> = expr_schema().variant_names().map(String::from).collect();
        assert_eq!(
            names,
            [
                "Binary", "Grouping", "Literal", "Unary", "Call", "Variable", "Ternary"
            ]
        );
    }

    #[test]
    fn test_expr_schema_uses_known_tags() {
        let schema = expr_schema();
        for field in schema.variants.iter().flat_map(|v| &v.fields) {
            assert!(classify(&field.tag).is_recognized(), "{}", field.tag);
        }
    }
}
