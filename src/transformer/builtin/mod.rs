//! Built-in specification transformers

pub mod defaults;
pub mod namespace;

pub use defaults::AttributeDefaults;
pub use namespace::Namespace;
