//! Intermediate representation for code generation.
//!
//! This module provides a resolved view of the schema: every field carries
//! its classification and every generated name is computed once.

use crate::classify::{Classification, classify};
use crate::types::{FieldSpec, Schema, TypeTag, VariantSpec};

/// Intermediate representation of a schema for code generation.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Base node type name.
    pub base_name: String,
    /// Output file name.
    pub header_name: String,
    /// Token type name.
    pub token_type: String,
    /// Header declaring the token type.
    pub token_header: String,
    /// Extra headers.
    pub includes: Vec<String>,
    /// Variants with resolved fields, in schema order.
    pub variants: Vec<ResolvedVariant>,
}

impl SchemaIr {
    /// Creates an intermediate representation from a schema.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let variants = schema
            .variants
            .iter()
            .map(|v| ResolvedVariant::from_variant_spec(v, &schema.base_name))
            .collect();

        Self {
            base_name: schema.base_name.clone(),
            header_name: schema.header_name.clone(),
            token_type: schema.token_type.clone(),
            token_header: schema.token_header.clone(),
            includes: schema.includes.clone(),
            variants,
        }
    }

    /// Returns the visitor interface name (`ExprVisitorBase`).
    #[must_use]
    pub fn visitor_base_name(&self) -> String {
        visitor_base_name(&self.base_name)
    }

    /// Returns the result-capturing visitor name (`ExprVisitor`).
    #[must_use]
    pub fn result_visitor_name(&self) -> String {
        result_visitor_name(&self.base_name)
    }

    /// Returns the captured result field name (`result_expr`).
    #[must_use]
    pub fn result_field_name(&self) -> String {
        format!("result_{}", self.base_name.to_lowercase())
    }

    /// Returns the parameter name used in visit methods (`expr`).
    #[must_use]
    pub fn visit_param_name(&self) -> String {
        visit_param_name(&self.base_name)
    }

    /// Returns true if any field carries an unrecognized tag.
    #[must_use]
    pub fn has_unrecognized_fields(&self) -> bool {
        self.variants
            .iter()
            .flat_map(|v| &v.fields)
            .any(|f| !f.classification.is_recognized())
    }
}

/// Resolved variant information.
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    /// Variant name.
    pub name: String,
    /// Visitor method dispatched to for this variant.
    pub visit_method: String,
    /// Resolved fields in schema order.
    pub fields: Vec<ResolvedField>,
}

impl ResolvedVariant {
    /// Creates a resolved variant from a variant definition.
    #[must_use]
    pub fn from_variant_spec(variant: &VariantSpec, base_name: &str) -> Self {
        let fields = variant
            .fields
            .iter()
            .map(|f| ResolvedField::from_field_spec(f, &variant.name))
            .collect();

        Self {
            name: variant.name.clone(),
            visit_method: visit_method_name(&variant.name, base_name),
            fields,
        }
    }

    /// Returns true if any field must be released by this variant.
    #[must_use]
    pub fn owns_resources(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.classification.ownership.is_owned())
    }
}

/// Resolved field information.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// Field name.
    pub name: String,
    /// Declared type tag.
    pub tag: TypeTag,
    /// Classifier output for the tag.
    pub classification: Classification,
}

impl ResolvedField {
    /// Creates a resolved field, classifying its tag.
    #[must_use]
    pub fn from_field_spec(field: &FieldSpec, variant: &str) -> Self {
        let classification = classify(&field.tag);
        if !classification.is_recognized() {
            tracing::warn!(
                "unrecognized type '{}' on {}.{}; passing by value, never released",
                field.tag,
                variant,
                field.name
            );
        }

        Self {
            name: field.name.clone(),
            tag: field.tag.clone(),
            classification,
        }
    }
}

/// Returns the visitor interface name for a base type.
#[must_use]
pub fn visitor_base_name(base_name: &str) -> String {
    format!("{}VisitorBase", base_name)
}

/// Returns the result-capturing visitor name for a base type.
#[must_use]
pub fn result_visitor_name(base_name: &str) -> String {
    format!("{}Visitor", base_name)
}

/// Returns the parameter name used in visit methods for a base type.
#[must_use]
pub fn visit_param_name(base_name: &str) -> String {
    base_name.to_lowercase()
}

/// Returns the visit method name for a variant (`visitBinaryExpr`).
#[must_use]
pub fn visit_method_name(variant: &str, base_name: &str) -> String {
    format!("visit{}{}", variant, base_name)
}
