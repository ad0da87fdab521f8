//! C++ header generation modules.

pub mod base;
pub mod fields;
pub mod header;
pub mod release;
pub mod variants;
pub mod visitor;

pub use base::BaseGenerator;
pub use fields::FieldRenderer;
pub use header::HeaderGenerator;
pub use release::ReleasePlan;
pub use variants::VariantGenerator;
pub use visitor::VisitorGenerator;
