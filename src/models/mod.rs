pub mod extension_policy;
pub mod reference;

pub use extension_policy::{normalize_extension, ExtensionPolicy};
pub use reference::{append_extension, Reference, ReferenceKind};
