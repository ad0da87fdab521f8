//! Inclusion guard and include list generation.

use crate::cpp::fields::FieldRenderer;
use crate::generator::{GeneratorConfig, GuardStyle, OwnershipModel};
use astgen_schema::SchemaIr;

/// Generator for the header prologue and epilogue.
pub struct HeaderGenerator<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
}

impl<'a> HeaderGenerator<'a> {
    /// Creates a new header generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Generates the guard opening and the include list.
    #[must_use]
    pub fn generate_prologue(&self) -> String {
        let mut output = String::new();

        match self.config.guard {
            GuardStyle::PragmaOnce => output.push_str("#pragma once\n\n"),
            GuardStyle::Macro => {
                let name = self.guard_macro();
                output.push_str(&format!("#ifndef {}\n", name));
                output.push_str(&format!("#define {}\n\n", name));
            }
        }

        for include in self.includes() {
            output.push_str(&format!("#include {}\n", include));
        }
        output.push('\n');

        output
    }

    /// Generates the guard closing, if the guard style needs one.
    #[must_use]
    pub fn generate_epilogue(&self) -> String {
        match self.config.guard {
            GuardStyle::PragmaOnce => String::new(),
            GuardStyle::Macro => format!("#endif // {}\n", self.guard_macro()),
        }
    }

    /// Returns the include targets in emission order, without duplicates.
    #[must_use]
    pub fn includes(&self) -> Vec<String> {
        let fields = FieldRenderer::new(self.ir, self.config.model);
        let managed = self.config.model == OwnershipModel::Managed;

        let mut wanted: Vec<String> = Vec::new();
        wanted.push(include_target(&self.ir.token_header));
        wanted.extend(self.ir.includes.iter().map(|path| include_target(path)));
        wanted.push("<vector>".to_string());
        if managed {
            wanted.push("<memory>".to_string());
        }
        if managed || fields.uses_pairs() {
            wanted.push("<utility>".to_string());
        }
        if fields.uses_opaque_value() {
            wanted.push("<any>".to_string());
        }

        let mut includes: Vec<String> = Vec::with_capacity(wanted.len());
        for target in wanted {
            if !includes.contains(&target) {
                includes.push(target);
            }
        }
        includes
    }

    /// Returns the guard macro name derived from the header name.
    #[must_use]
    pub fn guard_macro(&self) -> String {
        let mut name: String = self
            .ir
            .header_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        if !name.ends_with("_H") {
            name.push_str("_H");
        }
        name
    }
}

/// Wraps a bare header path in angle brackets.
fn include_target(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('<') || path.starts_with('"') {
        path.to_string()
    } else {
        format!("<{}>", path)
    }
}
