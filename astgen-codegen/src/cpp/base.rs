//! Base node type generation.

use crate::generator::{GeneratorConfig, OwnershipModel};
use astgen_schema::SchemaIr;

/// Generator for the base node type with two-step dispatch.
pub struct BaseGenerator<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
}

impl<'a> BaseGenerator<'a> {
    /// Creates a new base type generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Generates the base type definition.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let one = self.config.indent(1);
        let two = self.config.indent(2);
        let base = &self.ir.base_name;

        output.push_str(&format!("struct {} {{\n", base));

        // accept<T> forwards to the non-templated virtual and reads the result back.
        output.push_str(&format!("{}template <typename T>\n", one));
        output.push_str(&format!(
            "{}T accept({}<T>& visitor) {{\n",
            one,
            self.ir.result_visitor_name()
        ));
        output.push_str(&format!("{}do_accept(visitor);\n", two));
        output.push_str(&format!(
            "{}return visitor.{};\n",
            two,
            self.ir.result_field_name()
        ));
        output.push_str(&format!("{}}}\n\n", one));

        output.push_str(&format!(
            "{}virtual void do_accept({}& visitor) = 0;\n",
            one,
            self.ir.visitor_base_name()
        ));
        output.push_str(&format!("{}{}\n", one, self.destructor()));
        output.push_str("};\n\n");

        output
    }

    /// Returns the base destructor for the active ownership model.
    #[must_use]
    pub fn destructor(&self) -> String {
        match self.config.model {
            OwnershipModel::Managed => format!("virtual ~{}() = default;", self.ir.base_name),
            OwnershipModel::Manual => format!("virtual ~{}() {{}}", self.ir.base_name),
        }
    }
}
