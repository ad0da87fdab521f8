//! Header generator and its configuration.

use crate::cpp::{BaseGenerator, HeaderGenerator, VariantGenerator, VisitorGenerator};
use astgen_schema::SchemaIr;

/// Strategy for releasing the resources a node owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OwnershipModel {
    /// Owning wrapper types release fields automatically.
    #[default]
    Managed,
    /// Raw pointers released by generated destructors.
    Manual,
}

impl OwnershipModel {
    /// Parses an ownership model from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "managed" | "smart" => Some(Self::Managed),
            "manual" | "raw" => Some(Self::Manual),
            _ => None,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Manual => "manual",
        }
    }
}

/// One-time inclusion guard style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuardStyle {
    /// `#pragma once`.
    #[default]
    PragmaOnce,
    /// `#ifndef` / `#define` / `#endif` macro guard.
    Macro,
}

impl GuardStyle {
    /// Parses a guard style from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pragma" | "pragma-once" => Some(Self::PragmaOnce),
            "macro" | "ifndef" => Some(Self::Macro),
            _ => None,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PragmaOnce => "pragma",
            Self::Macro => "macro",
        }
    }
}

/// Configuration options for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Active ownership model.
    pub model: OwnershipModel,
    /// Inclusion guard style.
    pub guard: GuardStyle,
    /// One level of indentation.
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: OwnershipModel::default(),
            guard: GuardStyle::default(),
            indent: "\t".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the ownership model.
    #[must_use]
    pub fn with_model(mut self, model: OwnershipModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the guard style.
    #[must_use]
    pub fn with_guard(mut self, guard: GuardStyle) -> Self {
        self.guard = guard;
        self
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Returns `depth` levels of indentation.
    #[must_use]
    pub fn indent(&self, depth: usize) -> String {
        self.indent.repeat(depth)
    }
}

/// The five structural blocks of a generated header, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedBlocks {
    /// Forward declarations of every variant.
    pub forward_declarations: String,
    /// Visitor interface with one dispatch method per variant.
    pub visitor_base: String,
    /// Generic result-capturing visitor.
    pub result_visitor: String,
    /// Base node type.
    pub base_type: String,
    /// One definition per variant, in schema order.
    pub variants: Vec<String>,
}

impl EmittedBlocks {
    /// Concatenates the blocks in emission order.
    #[must_use]
    pub fn concat(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.forward_declarations);
        output.push_str(&self.visitor_base);
        output.push_str(&self.result_visitor);
        output.push_str(&self.base_type);
        for variant in &self.variants {
            output.push_str(variant);
        }
        output
    }
}

/// Generates a complete header from a schema IR.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self::with_config(ir, GeneratorConfig::default())
    }

    /// Creates a generator with an explicit configuration.
    #[must_use]
    pub fn with_config(ir: &'a SchemaIr, config: GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Emits the structural blocks without guard or includes.
    #[must_use]
    pub fn generate_blocks(&self) -> EmittedBlocks {
        let visitor = VisitorGenerator::new(self.ir, &self.config);
        let base = BaseGenerator::new(self.ir, &self.config);
        let variants = VariantGenerator::new(self.ir, &self.config);

        EmittedBlocks {
            forward_declarations: visitor.generate_forward_declarations(),
            visitor_base: visitor.generate_visitor_base(),
            result_visitor: visitor.generate_result_visitor(),
            base_type: base.generate(),
            variants: self
                .ir
                .variants
                .iter()
                .map(|v| {
                    tracing::debug!(
                        "emitting {} with {} field(s) ({} model)",
                        v.name,
                        v.fields.len(),
                        self.config.model.as_str()
                    );
                    variants.generate_variant(v)
                })
                .collect(),
        }
    }

    /// Generates the full header text.
    #[must_use]
    pub fn generate(&self) -> String {
        let header = HeaderGenerator::new(self.ir, &self.config);
        let mut output = header.generate_prologue();
        output.push_str(&self.generate_blocks().concat());
        output.push_str(&header.generate_epilogue());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::{Schema, VariantSpec};

    fn binary_literal() -> SchemaIr {
        let schema = Schema::new("Expr")
            .with_variant(
                VariantSpec::new("Binary")
                    .with_field("owned-node", "left")
                    .with_field("borrowed-token-ref", "op")
                    .with_field("owned-node", "right"),
            )
            .with_variant(VariantSpec::new("Literal").with_field("opaque-value", "value"));
        SchemaIr::from_schema(&schema)
    }

    #[test]
    fn test_ownership_model_parse() {
        assert_eq!(OwnershipModel::parse("managed"), Some(OwnershipModel::Managed));
        assert_eq!(OwnershipModel::parse("MANUAL"), Some(OwnershipModel::Manual));
        assert_eq!(OwnershipModel::parse("gc"), None);
        assert_eq!(OwnershipModel::default(), OwnershipModel::Managed);
        assert_eq!(OwnershipModel::Manual.as_str(), "manual");
    }

    #[test]
    fn test_guard_style_parse() {
        assert_eq!(GuardStyle::parse("pragma"), Some(GuardStyle::PragmaOnce));
        assert_eq!(GuardStyle::parse("ifndef"), Some(GuardStyle::Macro));
        assert_eq!(GuardStyle::parse("none"), None);
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::default()
            .with_model(OwnershipModel::Manual)
            .with_guard(GuardStyle::Macro)
            .with_indent("    ");
        assert_eq!(config.model, OwnershipModel::Manual);
        assert_eq!(config.guard, GuardStyle::Macro);
        assert_eq!(config.indent(2), "        ");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let ir = binary_literal();
        for model in [OwnershipModel::Managed, OwnershipModel::Manual] {
            let config = GeneratorConfig::default().with_model(model);
            let first = Generator::with_config(&ir, config.clone()).generate();
            let second = Generator::with_config(&ir, config).generate();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_block_order() {
        let ir = binary_literal();
        let output = Generator::new(&ir).generate();

        let positions: Vec<usize> = [
            "#pragma once",
            "#include <token>",
            "struct Binary;",
            "struct ExprVisitorBase {",
            "struct ExprVisitor : ExprVisitorBase {",
            "struct Expr {",
            "struct Binary : Expr {",
            "struct Literal : Expr {",
        ]
        .iter()
        .map(|needle| output.find(needle).expect(needle))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{output}");
    }

    #[test]
    fn test_blocks_concat_matches_body() {
        let ir = binary_literal();
        let generator = Generator::new(&ir);
        let blocks = generator.generate_blocks();

        assert_eq!(blocks.variants.len(), 2);
        assert!(generator.generate().contains(&blocks.concat()));
    }

    #[test]
    fn test_completeness_of_names() {
        let ir = binary_literal();
        let blocks = Generator::new(&ir).generate_blocks();

        for variant in &ir.variants {
            assert!(
                blocks
                    .forward_declarations
                    .contains(&format!("struct {};", variant.name))
            );
            assert!(
                blocks
                    .visitor_base
                    .contains(&format!("void {}({}&", variant.visit_method, variant.name))
            );
        }
        assert_eq!(blocks.forward_declarations.matches("struct ").count(), 2);
        assert_eq!(blocks.visitor_base.matches("= 0;").count(), 2);
    }
}
