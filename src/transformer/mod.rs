//! Specification transformer capability and its registration primitives

use anyhow::Result;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::Parameters;
use crate::specification::Specification;

pub mod builtin;
pub mod catalog;
pub mod registry;

#[cfg(test)]
mod tests;

pub use builtin::*;
pub use catalog::TransformerCatalog;
pub use registry::{TransformerRegistry, TransformerSet};

/// Shared singleton instance of a transformer
pub type TransformerInstance = Arc<dyn SpecificationTransformer>;

/// Transformer trait that all specification transformers must implement.
///
/// Instances are shared across exploration workers, so `transform` must be
/// safe to call concurrently on distinct specifications. Transformers must not
/// rely on running before or after any other transformer.
pub trait SpecificationTransformer: Send + Sync + 'static {
    /// Get transformer name
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Rewrite the specification in place
    fn transform(&self, specification: &mut Specification) -> Result<()>;
}

/// Eager constructor used when a registry instantiates its singletons
pub trait FromParameters: Sized {
    /// Build the transformer from the assembled parameters
    fn from_parameters(parameters: &Parameters) -> Result<Self>;
}

type Constructor = fn(&Parameters) -> Result<TransformerInstance>;

/// Identifies one transformer implementation by type identity
#[derive(Clone, Copy)]
pub struct TransformerDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    constructor: Constructor,
}

impl TransformerDescriptor {
    /// Descriptor for the transformer type `T`
    pub fn of<T>() -> Self
    where
        T: SpecificationTransformer + FromParameters,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: construct::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Run the eager constructor
    pub(crate) fn construct(&self, parameters: &Parameters) -> Result<TransformerInstance> {
        (self.constructor)(parameters)
    }
}

fn construct<T>(parameters: &Parameters) -> Result<TransformerInstance>
where
    T: SpecificationTransformer + FromParameters,
{
    Ok(Arc::new(T::from_parameters(parameters)?))
}

impl PartialEq for TransformerDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TransformerDescriptor {}

impl Hash for TransformerDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TransformerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformerDescriptor")
            .field(&self.type_name)
            .finish()
    }
}

impl fmt::Display for TransformerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
