//! Configuration management for DSE Transform

pub mod config;
pub mod modules;
pub mod parameters;


// Re-export main types for convenience
pub use config::TransformConfig;
pub use modules::{ConfiguredTransformers, ParameterModule};
pub use parameters::Parameters;
