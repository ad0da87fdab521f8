//! # astgen
//!
//! Schema-driven generator for closed, visitor-dispatched C++ node hierarchies.
//!
//! A schema lists the variants of a node hierarchy and their typed fields.
//! The generator emits a single header holding forward declarations, a
//! visitor interface, a generic result-capturing visitor, a base node type
//! with two-step `accept` / `do_accept` dispatch, and one struct per variant
//! whose constructor and destructor follow each field's ownership class.
//!
//! ## Quick Start
//!
//! ```ignore
//! use astgen::prelude::*;
//!
//! let config = GeneratorConfig::default().with_model(OwnershipModel::Manual);
//! let header = generate(&expr_schema(), &config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema model, field classifier, XML loading and validation
//! - [`codegen`] - Header generation and the output sink
//! - [`cli`] - Command-line front end used by the `astgen` binary

pub mod cli;
pub mod prelude;

/// Schema model, field classification and validation.
pub mod schema {
    pub use astgen_schema::*;
}

/// Header generation from schemas.
pub mod codegen {
    pub use astgen_codegen::*;
}
