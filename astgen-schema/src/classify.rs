//! Field type classification.
//!
//! Maps a declared [`TypeTag`] to the policies that drive constructor and
//! destructor emission: how the value is passed in, whether it is released
//! by its owning node, and what collection shape it has.
//!
//! The mapping is a fixed table. Tags missing from the table resolve to
//! `ByValueTransfer` / `NonOwned` and are spelled verbatim.

use crate::types::TypeTag;

/// How a constructor argument reaches its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassingPolicy {
    /// Ownership moves from the caller into the field.
    ByValueTransfer,
    /// A plain value copied into the field.
    ByValueCopy,
    /// The field aliases caller-owned storage and never releases it.
    ByConstReference,
}

/// Whether, and how, a field is released by its owning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipPolicy {
    /// Single value, released once.
    Owned,
    /// Collection of owned values, each released.
    OwnedSequence,
    /// Collection of owned pairs, both members released.
    OwnedPairSequence,
    /// Never released.
    NonOwned,
}

impl OwnershipPolicy {
    /// Returns true if the owning node must release the field.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        !matches!(self, Self::NonOwned)
    }
}

/// Collection shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionShape {
    /// A single value.
    Plain,
    /// An ordered sequence of values.
    Sequence,
    /// An ordered sequence of pairs.
    PairSequence,
}

/// What a field element refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Referent {
    /// The schema's base node type.
    Node,
    /// The schema's token type.
    Token,
    /// An opaque dynamically typed value.
    Value,
    /// An explicitly named type (from a tag argument).
    Named(String),
}

/// Element layout of a classified field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Single element.
    Plain(Referent),
    /// Sequence of elements.
    Sequence(Referent),
    /// Sequence of element pairs.
    PairSequence(Referent, Referent),
    /// Unrecognized tag, spelled as written.
    Verbatim(String),
}

impl Layout {
    /// Returns the collection shape of this layout.
    #[must_use]
    pub const fn shape(&self) -> CollectionShape {
        match self {
            Self::Plain(_) | Self::Verbatim(_) => CollectionShape::Plain,
            Self::Sequence(_) => CollectionShape::Sequence,
            Self::PairSequence(_, _) => CollectionShape::PairSequence,
        }
    }

    /// Iterates over the referents of this layout.
    pub fn referents(&self) -> impl Iterator<Item = &Referent> {
        let (first, second) = match self {
            Self::Plain(r) | Self::Sequence(r) => (Some(r), None),
            Self::PairSequence(a, b) => (Some(a), Some(b)),
            Self::Verbatim(_) => (None, None),
        };
        first.into_iter().chain(second)
    }
}

/// Result of classifying a type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Passing policy.
    pub passing: PassingPolicy,
    /// Ownership policy.
    pub ownership: OwnershipPolicy,
    /// Element layout.
    pub layout: Layout,
}

impl Classification {
    /// Returns the `(passing, ownership)` pair.
    #[must_use]
    pub fn policies(&self) -> (PassingPolicy, OwnershipPolicy) {
        (self.passing, self.ownership)
    }

    /// Returns the collection shape.
    #[must_use]
    pub fn shape(&self) -> CollectionShape {
        self.layout.shape()
    }

    /// Returns true if the tag was found in the classification table.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self.layout, Layout::Verbatim(_))
    }

    fn fallback(tag: &TypeTag) -> Self {
        Self {
            passing: PassingPolicy::ByValueTransfer,
            ownership: OwnershipPolicy::NonOwned,
            layout: Layout::Verbatim(tag.as_str().trim().to_string()),
        }
    }
}

/// Referent slot in the tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Node,
    Token,
    Value,
}

impl Slot {
    /// Node and value slots accept a tag argument; token slots do not.
    const fn takes_argument(self) -> bool {
        matches!(self, Self::Node | Self::Value)
    }

    fn resolve(self, argument: Option<&str>) -> Referent {
        match (self, argument) {
            (Self::Node | Self::Value, Some(name)) => Referent::Named(name.to_string()),
            (Self::Node, _) => Referent::Node,
            (Self::Value, _) => Referent::Value,
            (Self::Token, _) => Referent::Token,
        }
    }
}

struct KnownTag {
    name: &'static str,
    passing: PassingPolicy,
    ownership: OwnershipPolicy,
    shape: CollectionShape,
    first: Slot,
    second: Option<Slot>,
}

const KNOWN_TAGS: &[KnownTag] = &[
    KnownTag {
        name: "owned-node",
        passing: PassingPolicy::ByValueTransfer,
        ownership: OwnershipPolicy::Owned,
        shape: CollectionShape::Plain,
        first: Slot::Node,
        second: None,
    },
    KnownTag {
        name: "owned-token",
        passing: PassingPolicy::ByValueTransfer,
        ownership: OwnershipPolicy::Owned,
        shape: CollectionShape::Plain,
        first: Slot::Token,
        second: None,
    },
    KnownTag {
        name: "owned-node-sequence",
        passing: PassingPolicy::ByValueTransfer,
        ownership: OwnershipPolicy::OwnedSequence,
        shape: CollectionShape::Sequence,
        first: Slot::Node,
        second: None,
    },
    KnownTag {
        name: "owned-token-sequence",
        passing: PassingPolicy::ByValueTransfer,
        ownership: OwnershipPolicy::OwnedSequence,
        shape: CollectionShape::Sequence,
        first: Slot::Token,
        second: None,
    },
    KnownTag {
        name: "owned-token-node-pair-sequence",
        passing: PassingPolicy::ByValueTransfer,
        ownership: OwnershipPolicy::OwnedPairSequence,
        shape: CollectionShape::PairSequence,
        first: Slot::Token,
        second: Some(Slot::Node),
    },
    KnownTag {
        name: "borrowed-token-ref",
        passing: PassingPolicy::ByConstReference,
        ownership: OwnershipPolicy::NonOwned,
        shape: CollectionShape::Plain,
        first: Slot::Token,
        second: None,
    },
    KnownTag {
        name: "borrowed-node-ref",
        passing: PassingPolicy::ByConstReference,
        ownership: OwnershipPolicy::NonOwned,
        shape: CollectionShape::Plain,
        first: Slot::Node,
        second: None,
    },
    KnownTag {
        name: "opaque-value",
        passing: PassingPolicy::ByValueCopy,
        ownership: OwnershipPolicy::NonOwned,
        shape: CollectionShape::Plain,
        first: Slot::Value,
        second: None,
    },
];

/// Returns the names of all tags in the classification table.
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    KNOWN_TAGS.iter().map(|t| t.name)
}

/// Classifies a declared field type.
///
/// Total and deterministic: unrecognized tags, and known tags carrying an
/// argument they cannot take, resolve to `ByValueTransfer` / `NonOwned`
/// with a verbatim layout.
#[must_use]
pub fn classify(tag: &TypeTag) -> Classification {
    let (base, argument) = tag.split();
    let Some(known) = KNOWN_TAGS.iter().find(|t| t.name == base) else {
        return Classification::fallback(tag);
    };

    if argument.is_some() {
        let accepts = known.first.takes_argument()
            || known.second.is_some_and(Slot::takes_argument);
        if !accepts {
            return Classification::fallback(tag);
        }
    }

    let first = known.first.resolve(argument);
    let layout = match (known.shape, known.second) {
        (CollectionShape::PairSequence, Some(second)) => {
            Layout::PairSequence(first, second.resolve(argument))
        }
        (CollectionShape::Sequence, _) => Layout::Sequence(first),
        _ => Layout::Plain(first),
    };

    Classification {
        passing: known.passing,
        ownership: known.ownership,
        layout,
    }
}
