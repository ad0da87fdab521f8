//! Destructor release statements for the manual ownership model.

use astgen_schema::classify::{CollectionShape, OwnershipPolicy};
use astgen_schema::ir::ResolvedField;

/// How a field is released by its owning node's destructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleasePlan {
    /// Not owned; nothing to release.
    Skip,
    /// Delete the single owned value.
    Single,
    /// Delete every element of the sequence.
    EachElement,
    /// Delete both members of every pair.
    EachPair,
}

impl ReleasePlan {
    /// Chooses a plan from a field's ownership policy and shape.
    #[must_use]
    pub const fn for_field(ownership: OwnershipPolicy, shape: CollectionShape) -> Self {
        if !ownership.is_owned() {
            return Self::Skip;
        }
        match shape {
            CollectionShape::Plain => Self::Single,
            CollectionShape::Sequence => Self::EachElement,
            CollectionShape::PairSequence => Self::EachPair,
        }
    }

    /// Chooses a plan for a resolved field.
    #[must_use]
    pub fn of(field: &ResolvedField) -> Self {
        let class = &field.classification;
        Self::for_field(class.ownership, class.shape())
    }

    /// Returns the release statement for a field named `name`.
    #[must_use]
    pub fn statement(&self, name: &str) -> Option<String> {
        // Loop variable must not shadow the field itself.
        let item = if name == "item" { "entry" } else { "item" };
        match self {
            Self::Skip => None,
            Self::Single => Some(format!("delete {};", name)),
            Self::EachElement => Some(format!("for (auto* {1} : {0}) delete {1};", name, item)),
            Self::EachPair => Some(format!(
                "for (const auto& {1} : {0}) {{ delete {1}.first; delete {1}.second; }}",
                name, item
            )),
        }
    }
}
