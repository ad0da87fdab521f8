//! Variant struct generation.

use crate::cpp::fields::FieldRenderer;
use crate::cpp::release::ReleasePlan;
use crate::generator::{GeneratorConfig, OwnershipModel};
use astgen_schema::SchemaIr;
use astgen_schema::ir::ResolvedVariant;

/// Generator for the concrete variant types.
pub struct VariantGenerator<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
    fields: FieldRenderer<'a>,
}

impl<'a> VariantGenerator<'a> {
    /// Creates a new variant generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Self {
        Self {
            ir,
            config,
            fields: FieldRenderer::new(ir, config.model),
        }
    }

    /// Generates every variant definition in schema order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        for variant in &self.ir.variants {
            output.push_str(&self.generate_variant(variant));
        }
        output
    }

    /// Generates one variant definition.
    #[must_use]
    pub fn generate_variant(&self, variant: &ResolvedVariant) -> String {
        let mut output = String::new();
        let indent = self.config.indent(1);

        output.push_str(&format!(
            "struct {} : {} {{\n",
            variant.name, self.ir.base_name
        ));

        for field in &variant.fields {
            output.push_str(&format!("{}{}\n", indent, self.fields.declaration(field)));
        }
        if !variant.fields.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("{}{}\n", indent, self.constructor(variant)));
        if self.config.model == OwnershipModel::Manual {
            output.push_str(&self.destructor(variant));
        }
        output.push('\n');

        output.push_str(&format!(
            "{}void do_accept({}& visitor) override {{ visitor.{}(*this); }}\n",
            indent,
            self.ir.visitor_base_name(),
            variant.visit_method
        ));
        output.push_str("};\n\n");

        output
    }

    /// Generates the constructor with its member-initializer list.
    #[must_use]
    pub fn constructor(&self, variant: &ResolvedVariant) -> String {
        let params: Vec<String> = variant
            .fields
            .iter()
            .map(|f| self.fields.parameter(f))
            .collect();
        let inits: Vec<String> = variant
            .fields
            .iter()
            .map(|f| self.fields.initializer(f))
            .collect();

        if inits.is_empty() {
            format!("{}() {{}}", variant.name)
        } else {
            format!(
                "{}({}) : {} {{}}",
                variant.name,
                params.join(", "),
                inits.join(", ")
            )
        }
    }

    /// Generates the releasing destructor used by the manual model.
    #[must_use]
    pub fn destructor(&self, variant: &ResolvedVariant) -> String {
        let one = self.config.indent(1);
        let two = self.config.indent(2);

        if !variant.owns_resources() {
            return format!("{}~{}() override {{}}\n", one, variant.name);
        }

        let statements = variant
            .fields
            .iter()
            .filter_map(|f| ReleasePlan::of(f).statement(&f.name));

        let mut output = format!("{}~{}() override {{\n", one, variant.name);
        for statement in statements {
            output.push_str(&format!("{}{}\n", two, statement));
        }
        output.push_str(&format!("{}}}\n", one));
        output
    }
}
