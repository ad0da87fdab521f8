//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use astgen::prelude::*;
//! ```

// Schema types
pub use astgen_schema::{
    Classification, OwnershipPolicy, PassingPolicy, Schema, SchemaIr, TypeTag, VariantSpec,
    classify, expr_schema, parse_schema, validate_schema,
};

// Generation
pub use astgen_codegen::{
    CodegenError, Generator, GeneratorConfig, GuardStyle, OwnershipModel, generate,
    generate_from_file, generate_from_xml, generate_to_dir, write_artifact,
};
