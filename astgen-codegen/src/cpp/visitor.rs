//! Forward declaration and visitor interface generation.

use crate::generator::GeneratorConfig;
use astgen_schema::SchemaIr;

/// Generator for forward declarations and both visitor types.
pub struct VisitorGenerator<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
}

impl<'a> VisitorGenerator<'a> {
    /// Creates a new visitor generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Generates one forward declaration per variant, in schema order.
    #[must_use]
    pub fn generate_forward_declarations(&self) -> String {
        let mut output = String::new();

        for variant in &self.ir.variants {
            output.push_str(&format!("struct {};\n", variant.name));
        }
        if !self.ir.variants.is_empty() {
            output.push('\n');
        }

        output
    }

    /// Generates the visitor interface with one pure dispatch method per variant.
    #[must_use]
    pub fn generate_visitor_base(&self) -> String {
        let mut output = String::new();
        let indent = self.config.indent(1);
        let param = self.ir.visit_param_name();

        output.push_str(&format!("struct {} {{\n", self.ir.visitor_base_name()));
        for variant in &self.ir.variants {
            output.push_str(&format!(
                "{}virtual void {}({}& {}) = 0;\n",
                indent, variant.visit_method, variant.name, param
            ));
        }
        output.push_str("};\n\n");

        output
    }

    /// Generates the generic visitor that captures a typed result.
    #[must_use]
    pub fn generate_result_visitor(&self) -> String {
        let mut output = String::new();

        output.push_str("template <typename T>\n");
        output.push_str(&format!(
            "struct {} : {} {{\n",
            self.ir.result_visitor_name(),
            self.ir.visitor_base_name()
        ));
        output.push_str(&format!(
            "{}T {}{{}};\n",
            self.config.indent(1),
            self.ir.result_field_name()
        ));
        output.push_str("};\n\n");

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
    fn test_forward_declarations() {
        let ir = binary_literal();
        let config = GeneratorConfig::default();
        assert_eq!(
            VisitorGenerator::new(&ir, &config).generate_forward_declarations(),
            "struct Binary;\nstruct Literal;\n\n"
        );
    }

    #[test]
    fn test_visitor_base() {
        let ir = binary_literal();
        let config = GeneratorConfig::default();
        assert_eq!(
            VisitorGenerator::new(&ir, &config).generate_visitor_base(),
            "struct ExprVisitorBase {\n\
             \tvirtual void visitBinaryExpr(Binary& expr) = 0;\n\
             \tvirtual void visitLiteralExpr(Literal& expr) = 0;\n\
             };\n\n"
        );
    }

    #[test]
    fn test_result_visitor() {
        let ir = binary_literal();
        let config = GeneratorConfig::default().with_indent("    ");
        assert_eq!(
            VisitorGenerator::new(&ir, &config).generate_result_visitor(),
            "template <typename T>\n\
             struct ExprVisitor : ExprVisitorBase {\n    \
             T result_expr{};\n\
             };\n\n"
        );
    }

    #[test]
    fn test_empty_schema() {
        let ir = SchemaIr::from_schema(&Schema::new("Stmt"));
        let config = GeneratorConfig::default();
        let visitor = VisitorGenerator::new(&ir, &config);

        assert!(visitor.generate_forward_declarations().is_empty());
        assert_eq!(visitor.generate_visitor_base(), "struct StmtVisitorBase {\n};\n\n");
    }
}
