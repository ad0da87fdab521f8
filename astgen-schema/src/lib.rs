//! # astgen Schema
//!
//! Schema model for closed, visitor-dispatched node hierarchies.
//!
//! This crate provides:
//! - Variant and field definitions with order-preserving storage
//! - The field type classifier (passing and ownership policies)
//! - XML schema loading
//! - Schema validation
//! - Intermediate representation for code generation

pub mod builtin;
pub mod classify;
pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use builtin::expr_schema;
pub use classify::{
    Classification, CollectionShape, Layout, OwnershipPolicy, PassingPolicy, Referent, classify,
};
pub use error::{ParseError, SchemaError};
pub use ir::SchemaIr;
pub use parser::parse_schema;
pub use types::{FieldSpec, Schema, TypeTag, VariantSpec};
pub use validation::validate_schema;
