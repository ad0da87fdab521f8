//! # astgen Codegen
//!
//! C++ node hierarchy generation from astgen schemas.
//!
//! This crate provides:
//! - Forward declarations and visitor interface generation
//! - Base type generation with two-step `accept` / `do_accept` dispatch
//! - Variant generation under the managed or manual ownership model
//! - An output sink that never leaves a partial header

pub mod cpp;
pub mod error;
pub mod generator;
pub mod sink;

pub use error::CodegenError;
pub use generator::{EmittedBlocks, Generator, GeneratorConfig, GuardStyle, OwnershipModel};
pub use sink::write_artifact;

use astgen_schema::{Schema, SchemaIr};
use std::path::{Path, PathBuf};

/// Generates a header from an in-memory schema.
///
/// # Arguments
/// * `schema` - Schema to generate
/// * `config` - Generator configuration
///
/// # Returns
/// Generated header text.
///
/// # Errors
/// Returns `CodegenError` if the schema fails validation.
pub fn generate(schema: &Schema, config: &GeneratorConfig) -> Result<String, CodegenError> {
    astgen_schema::validate_schema(schema)?;
    let ir = SchemaIr::from_schema(schema);
    if ir.has_unrecognized_fields() {
        tracing::info!(
            "{}: unrecognized field types are passed by value and never released",
            ir.header_name
        );
    }
    let generator = Generator::with_config(&ir, config.clone());
    Ok(generator.generate())
}

/// Generates a header from an XML schema string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_xml(xml: &str, config: &GeneratorConfig) -> Result<String, CodegenError> {
    let schema = astgen_schema::parse_schema(xml)?;
    generate(&schema, config)
}

/// Generates a header from an XML schema file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_file(path: &Path, config: &GeneratorConfig) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

/// Generates a header and writes it to `dir`, named after the schema.
///
/// The header is fully assembled before anything touches the filesystem.
///
/// # Returns
/// The path of the written header.
///
/// # Errors
/// Returns `CodegenError` if generation fails or the header cannot be written.
pub fn generate_to_dir(
    schema: &Schema,
    config: &GeneratorConfig,
    dir: &Path,
) -> Result<PathBuf, CodegenError> {
    let header = generate(schema, config)?;
    write_artifact(dir, &schema.header_name, &header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::{VariantSpec, expr_schema};

    #[test]
    fn test_generate_builtin_schema() {
        let header = generate(&expr_schema(), &GeneratorConfig::default()).unwrap();

        for name in [
            "Binary", "Grouping", "Literal", "Unary", "Call", "Variable", "Ternary",
        ] {
            assert!(header.contains(&format!("struct {};\n", name)));
            assert!(header.contains(&format!("struct {} : Expr {{\n", name)));
            assert!(header.contains(&format!("visitor.visit{}Expr(*this);", name)));
        }
        assert!(header.contains(
            "\tCall(std::unique_ptr<Expr> callee, const Token& paren, \
             std::vector<std::unique_ptr<Expr>> args) \
             : callee(std::move(callee)), paren(paren), args(std::move(args)) {}\n"
        ));
    }

    #[test]
    fn test_generate_rejects_invalid_schema() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Nil"))
            .with_variant(VariantSpec::new("Nil"));
        assert!(matches!(
            generate(&schema, &GeneratorConfig::default()),
            Err(CodegenError::Schema(_))
        ));
    }

    #[test]
    fn test_generate_rejects_keyword_field() {
        let schema = Schema::new("Expr")
            .with_variant(VariantSpec::new("Unary").with_field("owned-node", "delete"));
        let config = GeneratorConfig::default().with_model(OwnershipModel::Manual);
        assert!(matches!(
            generate(&schema, &config),
            Err(CodegenError::Schema(_))
        ));
    }

    #[test]
    fn test_generate_from_xml() {
        let xml = r#"<astSchema base="Expr">
    <variant name="Binary">
        <field name="left" type="owned-node"/>
        <field name="op" type="borrowed-token-ref"/>
        <field name="right" type="owned-node"/>
    </variant>
    <variant name="Literal">
        <field name="value" type="opaque-value"/>
    </variant>
</astSchema>"#;

        let header = generate_from_xml(xml, &GeneratorConfig::default()).unwrap();
        assert!(header.starts_with("#pragma once\n"));
        assert!(header.contains("\tvirtual void visitBinaryExpr(Binary& expr) = 0;\n"));
        assert!(header.contains("\tvirtual void visitLiteralExpr(Literal& expr) = 0;\n"));
        assert!(header.contains("\tT accept(ExprVisitor<T>& visitor) {\n"));
        assert!(header.contains("\tLiteral(std::any value) : value(value) {}\n"));

        assert!(matches!(
            generate_from_xml("<astSchema/>", &GeneratorConfig::default()),
            Err(CodegenError::Parse(_))
        ));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let result = generate_from_file(
            Path::new("/nonexistent/schema.xml"),
            &GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_generate_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default().with_model(OwnershipModel::Manual);
        let path = generate_to_dir(&expr_schema(), &config, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("expr"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, generate(&expr_schema(), &config).unwrap());
        assert!(written.contains("\t\tfor (auto* item : args) delete item;\n"));
        assert!(!written.contains("#include <memory>"));
    }

    #[test]
    fn test_invalid_schema_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = Schema::new("1Expr");

        assert!(generate_to_dir(&schema, &GeneratorConfig::default(), dir.path()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
