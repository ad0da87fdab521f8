//! Schema validation utilities.
//!
//! Checks that every name in a schema can be emitted as a C++ identifier
//! (keywords included) and that variant and field names are unique. Field type tags are never
//! rejected here: unrecognized tags are resolved by the classifier.

use crate::error::SchemaError;
use crate::ir::{result_visitor_name, visit_param_name, visitor_base_name};
use crate::types::{Schema, VariantSpec};
use std::collections::HashSet;

/// Validates a schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    if !is_identifier(&schema.base_name) {
        return Err(SchemaError::invalid_identifier("base", &schema.base_name));
    }
    let param = visit_param_name(&schema.base_name);
    if !is_identifier(&param) {
        return Err(SchemaError::Validation {
            message: format!(
                "Base '{}' yields visitor parameter '{}', which is not an identifier",
                schema.base_name, param
            ),
        });
    }
    if !is_identifier(&schema.token_type) {
        return Err(SchemaError::invalid_identifier(
            "token type",
            &schema.token_type,
        ));
    }
    validate_variants(schema)?;
    Ok(())
}

/// Validates variant names and each variant's fields.
fn validate_variants(schema: &Schema) -> Result<(), SchemaError> {
    let reserved = [
        schema.base_name.clone(),
        visitor_base_name(&schema.base_name),
        result_visitor_name(&schema.base_name),
    ];
    let mut seen_names = HashSet::new();

    for variant in &schema.variants {
        if !is_identifier(&variant.name) {
            return Err(SchemaError::invalid_identifier("variant", &variant.name));
        }

        if reserved.contains(&variant.name) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Variant '{}' collides with a generated type of base '{}'",
                    variant.name, schema.base_name
                ),
            });
        }

        if !seen_names.insert(variant.name.as_str()) {
            return Err(SchemaError::duplicate("variant", &variant.name));
        }

        validate_fields(variant)?;
    }

    Ok(())
}

/// Validates fields within a variant.
fn validate_fields(variant: &VariantSpec) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for field in &variant.fields {
        if !is_identifier(&field.name) {
            return Err(SchemaError::invalid_identifier(
                "field",
                format!("{}.{}", variant.name, field.name),
            ));
        }

        if field.name == variant.name {
            return Err(SchemaError::Validation {
                message: format!(
                    "Field '{}.{}' has the name of its variant",
                    variant.name, field.name
                ),
            });
        }

        if !seen_names.insert(field.name.as_str()) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", variant.name, field.name),
            ));
        }
    }

    Ok(())
}

/// C++ keywords and alternative operator tokens.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "co_await",
    "co_return", "co_yield", "compl", "concept", "const", "const_cast", "consteval",
    "constexpr", "constinit", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "register", "reinterpret_cast", "requires", "return", "short", "signed", "sizeof",
    "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Returns true if `name` is a C++ keyword.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    CPP_KEYWORDS.contains(&name)
}

/// Returns true if `name` is a usable C++ identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_keyword(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_validate_valid_schema() {
        let xml = r#"<astSchema base="Expr">
    <variant name="Binary">
        <field name="left" type="owned-node"/>
        <field name="op" type="borrowed-token-ref"/>
        <field name="right" type="owned-node"/>
    </variant>
    <variant name="Nil"/>
</astSchema>"#;

        let schema = parse_schema(xml).expect("Failed to parse");
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_validate_accepts_unknown_tags() {
        let schema = Schema::new("Expr").with_variant(
            VariantSpec::new("Literal").with_field("definitely-not-a-tag", "value"),
        );
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_validate_duplicate_variant() {
        let xml = r#"<astSchema base="Expr">
    <variant name="Literal"/>
    <variant name="Literal"/>
</astSchema>"#;

        let schema = parse_schema(xml).expect("Failed to parse");
        let result = validate_schema(&schema);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateDefinition { ref kind, .. }) if kind == "variant"
        ));
    }

    #[test]
    fn test_validate_duplicate_field() {
        let schema = Schema::new("Expr").with_variant(
            VariantSpec::new("Binary")
                .with_field("owned-node", "left")
                .with_field("owned-node", "left"),
        );

        let result = validate_schema(&schema);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateDefinition { ref name, .. }) if name == "Binary.left"
        ));
    }

    #[test]
    fn test_validate_same_field_name_across_variants() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Unary").with_field("owned-node", "right"))
            .with_variant(VariantSpec::new("Binary").with_field("owned-node", "right"));
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_validate_invalid_identifiers() {
        let bad_base = Schema::new("1Expr");
        assert!(matches!(
            validate_schema(&bad_base),
            Err(SchemaError::InvalidIdentifier { .. })
        ));

        let bad_variant = Schema::new("Expr").with_variant(VariantSpec::new("Bin ary"));
        assert!(matches!(
            validate_schema(&bad_variant),
            Err(SchemaError::InvalidIdentifier { .. })
        ));

        let bad_field =
            Schema::new("Expr").with_variant(VariantSpec::new("Binary").with_field("owned-node", ""));
        assert!(matches!(
            validate_schema(&bad_field),
            Err(SchemaError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_validate_reserved_variant_names() {
        for name in ["Expr", "ExprVisitorBase", "ExprVisitor"] {
            let schema = Schema::new("Expr").with_variant(VariantSpec::new(name));
            assert!(
                matches!(validate_schema(&schema), Err(SchemaError::Validation { .. })),
                "{name}"
            );
        }
    }

    #[test]
    fn test_validate_keyword_field_names() {
        for name in ["delete", "class", "new", "this"] {
            let schema = Schema::new("Expr")
                .with_variant(VariantSpec::new("Binary").with_field("owned-node", name));
            assert!(
                matches!(
                    validate_schema(&schema),
                    Err(SchemaError::InvalidIdentifier { name: ref field, .. }) if field.starts_with("Binary.")
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_validate_keyword_type_names() {
        let keyword_variant = Schema::new("Stmt").with_variant(VariantSpec::new("return"));
        assert!(matches!(
            validate_schema(&keyword_variant),
            Err(SchemaError::InvalidIdentifier { .. })
        ));

        let mut keyword_token = Schema::new("Expr");
        keyword_token.token_type = "int".to_string();
        assert!(matches!(
            validate_schema(&keyword_token),
            Err(SchemaError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_validate_visitor_parameter_name() {
        for base in ["Class", "Operator"] {
            assert!(
                matches!(
                    validate_schema(&Schema::new(base)),
                    Err(SchemaError::Validation { .. })
                ),
                "{base}"
            );
        }
        assert!(validate_schema(&Schema::new("Node")).is_ok());
    }

    #[test]
    fn test_validate_field_named_like_variant() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Binary").with_field("owned-node", "Binary"));
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::Validation { .. })
        ));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("left"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("true_case2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2nd"));
        assert!(!is_identifier("owned-node"));
        assert!(!is_identifier("delete"));
        assert!(!is_identifier("class"));
        assert!(is_identifier("Class"));
        assert!(is_identifier("deleted"));
        assert!(is_keyword("xor_eq"));
    }
}
