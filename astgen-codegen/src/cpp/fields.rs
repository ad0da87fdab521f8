//! Field spelling under each ownership model.
//!
//! Turns a classified field into its member declaration, constructor
//! parameter and member initializer.

use crate::generator::OwnershipModel;
use astgen_schema::SchemaIr;
use astgen_schema::classify::{Layout, PassingPolicy, Referent};
use astgen_schema::ir::ResolvedField;

/// Renders classified fields as C++ declarations.
pub struct FieldRenderer<'a> {
    ir: &'a SchemaIr,
    model: OwnershipModel,
}

impl<'a> FieldRenderer<'a> {
    /// Creates a renderer for the given model.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, model: OwnershipModel) -> Self {
        Self { ir, model }
    }

    /// Returns the field's type as spelled in the constructor parameter.
    #[must_use]
    pub fn type_spelling(&self, field: &ResolvedField) -> String {
        let class = &field.classification;
        match (&class.layout, class.passing) {
            (Layout::Verbatim(text), _) => text.clone(),
            (layout, PassingPolicy::ByConstReference) => {
                let aliased = self.collection(layout, false);
                match self.model {
                    OwnershipModel::Managed => format!("const {}&", aliased),
                    OwnershipModel::Manual => format!("const {}*", aliased),
                }
            }
            (layout, _) => self.collection(layout, class.ownership.is_owned()),
        }
    }

    /// Returns the member declaration, read-only after construction.
    ///
    /// Pointers are qualified on the pointer itself so the pointee stays
    /// visitable; references are already fixed.
    #[must_use]
    pub fn declaration(&self, field: &ResolvedField) -> String {
        let spelling = self.type_spelling(field);
        if spelling.ends_with('*') {
            format!("{} const {};", spelling, field.name)
        } else if spelling.ends_with('&') || spelling.starts_with("const ") {
            format!("{} {};", spelling, field.name)
        } else {
            format!("const {} {};", spelling, field.name)
        }
    }

    /// Returns true if any field spells a pair sequence.
    #[must_use]
    pub fn uses_pairs(&self) -> bool {
        self.ir
            .variants
            .iter()
            .flat_map(|v| &v.fields)
            .any(|f| matches!(f.classification.layout, Layout::PairSequence(_, _)))
    }

    /// Returns the constructor parameter.
    #[must_use]
    pub fn parameter(&self, field: &ResolvedField) -> String {
        format!("{} {}", self.type_spelling(field), field.name)
    }

    /// Returns true if the initializer moves the argument into the field.
    #[must_use]
    pub fn is_transferred(&self, field: &ResolvedField) -> bool {
        self.model == OwnershipModel::Managed
            && field.classification.passing == PassingPolicy::ByValueTransfer
    }

    /// Returns the member initializer.
    #[must_use]
    pub fn initializer(&self, field: &ResolvedField) -> String {
        if self.is_transferred(field) {
            format!("{0}(std::move({0}))", field.name)
        } else {
            format!("{0}({0})", field.name)
        }
    }

    /// Returns true if any field spells the opaque value type.
    #[must_use]
    pub fn uses_opaque_value(&self) -> bool {
        self.ir
            .variants
            .iter()
            .flat_map(|v| &v.fields)
            .flat_map(|f| f.classification.layout.referents())
            .any(|r| *r == Referent::Value)
    }

    fn collection(&self, layout: &Layout, owned: bool) -> String {
        match layout {
            Layout::Plain(r) => self.element(r, owned),
            Layout::Sequence(r) => format!("std::vector<{}>", self.element(r, owned)),
            Layout::PairSequence(a, b) => format!(
                "std::vector<std::pair<{}, {}>>",
                self.element(a, owned),
                self.element(b, owned)
            ),
            Layout::Verbatim(text) => text.clone(),
        }
    }

    fn element(&self, referent: &Referent, owned: bool) -> String {
        let name = self.referent_name(referent);
        match (owned, self.model) {
            (false, _) => name.to_string(),
            (true, OwnershipModel::Managed) => format!("std::unique_ptr<{}>", name),
            (true, OwnershipModel::Manual) => format!("{}*", name),
        }
    }

    fn referent_name<'r>(&'r self, referent: &'r Referent) -> &'r str {
        match referent {
            Referent::Node => &self.ir.base_name,
            Referent::Token => &self.ir.token_type,
            Referent::Value => "std::any",
            Referent::Named(name) => name,
        }
    }
}
