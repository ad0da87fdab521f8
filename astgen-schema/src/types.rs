//! Schema type definitions.
//!
//! This module contains the data structures describing a node hierarchy:
//! the schema itself, its variants and their typed fields. Declaration order
//! is preserved everywhere, since it fixes the order of every emitted block.

use std::fmt;

/// Default token type name.
pub const DEFAULT_TOKEN_TYPE: &str = "Token";

/// Default header providing the token type.
pub const DEFAULT_TOKEN_HEADER: &str = "token";

/// Complete node hierarchy schema.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Base node type name (e.g. `Expr`).
    pub base_name: String,
    /// Output file name of the generated header.
    pub header_name: String,
    /// Token type referenced by token fields.
    pub token_type: String,
    /// Header declaring the token type.
    pub token_header: String,
    /// Extra headers included after the token header.
    pub includes: Vec<String>,
    /// Variant definitions in declaration order.
    pub variants: Vec<VariantSpec>,
}

impl Schema {
    /// Creates a new empty schema for the given base type.
    #[must_use]
    pub fn new(base_name: impl Into<String>) -> Self {
        let base_name = base_name.into();
        Self {
            header_name: base_name.to_lowercase(),
            base_name,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            includes: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Adds a variant, keeping declaration order.
    ///
    /// Duplicate names are kept so validation can report them.
    pub fn add_variant(&mut self, variant: VariantSpec) {
        self.variants.push(variant);
    }

    /// Builder-style variant insertion.
    #[must_use]
    pub fn with_variant(mut self, variant: VariantSpec) -> Self {
        self.add_variant(variant);
        self
    }

    /// Returns the variant names in declaration order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }
}

/// One case of the closed node hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// Variant name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl VariantSpec {
    /// Creates a variant with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the variant.
    pub fn add_field(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with_field(mut self, tag: impl Into<TypeTag>, name: impl Into<String>) -> Self {
        self.add_field(FieldSpec::new(tag, name));
        self
    }

    /// Returns true if the variant carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Typed field of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared type tag.
    pub tag: TypeTag,
    /// Field name.
    pub name: String,
}

impl FieldSpec {
    /// Creates a new field.
    #[must_use]
    pub fn new(tag: impl Into<TypeTag>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
        }
    }
}

/// Declared field type, e.g. `owned-node` or `borrowed-token-ref`.
///
/// Tags are opaque to the schema; only the classifier gives them meaning.
/// A tag may carry one angle-bracket argument (`owned-node<Expr>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(String);

impl TypeTag {
    /// Creates a tag from its textual form.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the tag into its base name and optional argument.
    ///
    /// `owned-node<Expr>` yields `("owned-node", Some("Expr"))`. Text that is
    /// not a well-formed single argument yields the whole tag as base.
    #[must_use]
    pub fn split(&self) -> (&str, Option<&str>) {
        let text = self.0.trim();
        let Some(open) = text.find('<') else {
            return (text, None);
        };
        match text[open + 1..].strip_suffix('>').map(str::trim) {
            Some(inner) if !inner.is_empty() && !inner.contains(['<', '>']) => {
                (text[..open].trim_end(), Some(inner))
            }
            _ => (text, None),
        }
    }
}

impl From<&str> for TypeTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_defaults() {
        let schema = Schema::new("Expr");
        assert_eq!(schema.base_name, "Expr");
        assert_eq!(schema.header_name, "expr");
        assert_eq!(schema.token_type, "Token");
        assert_eq!(schema.token_header, "token");
        assert!(schema.variants.is_empty());
    }

    #[test]
    fn test_schema_preserves_variant_order() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Unary"))
            .with_variant(VariantSpec::new("Binary"))
            .with_variant(VariantSpec::new("Literal"));

        let names: Vec<_> = schema.variant_names().collect();
        assert_eq!(names, ["Unary", "Binary", "Literal"]);
    }

    #[test]
    fn test_schema_keeps_duplicate_variants() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Literal").with_field("opaque-value", "value"))
            .with_variant(VariantSpec::new("Literal"));

        assert_eq!(schema.variants.len(), 2);
        assert_eq!(schema.variants[0].fields.len(), 1);
        assert!(schema.variants[1].is_empty());
    }

    #[test]
    fn test_variant_field_order() {
        let variant = VariantSpec::new("Binary")
            .with_field("owned-node", "left")
            .with_field("borrowed-token-ref", "op")
            .with_field("owned-node", "right");

        let names: Vec<_> = variant.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["left", "op", "right"]);
        assert!(!variant.is_empty());
        assert!(VariantSpec::new("Break").is_empty());
    }

    #[test]
    fn test_type_tag_split() {
        assert_eq!(TypeTag::from("owned-node").split(), ("owned-node", None));
        assert_eq!(
            TypeTag::from("owned-node<Expr>").split(),
            ("owned-node", Some("Expr"))
        );
        assert_eq!(
            TypeTag::from(" opaque-value< double > ").split(),
            ("opaque-value", Some("double"))
        );
    }

    #[test]
    fn test_type_tag_split_malformed() {
        let nested = TypeTag::from("std::vector<std::unique_ptr<Expr>>");
        assert_eq!(nested.split(), ("std::vector<std::unique_ptr<Expr>>", None));

        let empty = TypeTag::from("owned-node<>");
        assert_eq!(empty.split(), ("owned-node<>", None));

        let open = TypeTag::from("owned-node<Expr");
        assert_eq!(open.split(), ("owned-node<Expr", None));
    }

    #[test]
    fn test_type_tag_display() {
        let tag = TypeTag::new("borrowed-token-ref");
        assert_eq!(tag.to_string(), "borrowed-token-ref");
        assert_eq!(tag.as_str(), "borrowed-token-ref");
    }
}
