//! Assembly-time module system
//!
//! Modules are installed into an [`crate::Assembly`] and configured exactly
//! once. [`TransformerModule`] is the extension point deployments implement to
//! opt transformers into the assembly's registry; every transformer module is
//! also an [`ExplorationModule`] and composes with the other modules of a
//! configuration.

use anyhow::Result;

use crate::config::Parameters;
use crate::transformer::{
    FromParameters, SpecificationTransformer, TransformerCatalog, TransformerDescriptor,
    TransformerRegistry,
};
use crate::BindingError;

/// A unit of configuration for design-space exploration
pub trait ExplorationModule {
    /// Module name used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Add bindings to the assembly
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()>;
}

/// Binding context handed to a module while it is configured
pub struct Binder<'a> {
    module: &'a str,
    parameters: &'a mut Parameters,
    registry: &'a mut TransformerRegistry,
    catalog: &'a TransformerCatalog,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(
        module: &'a str,
        parameters: &'a mut Parameters,
        registry: &'a mut TransformerRegistry,
        catalog: &'a TransformerCatalog,
    ) -> Self {
        Self {
            module,
            parameters,
            registry,
            catalog,
        }
    }

    /// Name of the module being configured
    pub fn module(&self) -> &str {
        self.module
    }

    /// Bind a parameter value
    pub fn bind_parameter(&mut self, key: impl Into<String>, value: serde_yaml::Value) {
        self.parameters.bind(key, value);
    }

    /// Parameters bound so far
    pub fn parameters(&self) -> &Parameters {
        self.parameters
    }

    pub fn catalog(&self) -> &TransformerCatalog {
        self.catalog
    }

    fn register(&mut self, descriptor: TransformerDescriptor) {
        self.registry.register(descriptor, self.module);
    }
}

/// Module that opts specification transformers into an assembly
pub trait TransformerModule {
    /// Module name used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Call [`TransformerBinder::bind_transformer`] once per transformer to enable
    fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()>;
}

impl<M: TransformerModule> ExplorationModule for M {
    fn name(&self) -> &str {
        TransformerModule::name(self)
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        self.bind_transformers(&mut TransformerBinder { binder })
    }
}

/// Restricted binder exposed to [`TransformerModule`]s
pub struct TransformerBinder<'b, 'a> {
    binder: &'b mut Binder<'a>,
}

impl TransformerBinder<'_, '_> {
    /// Enable the transformer `T`. Binding the same type again is a no-op.
    pub fn bind_transformer<T>(&mut self)
    where
        T: SpecificationTransformer + FromParameters,
    {
        self.binder.register(TransformerDescriptor::of::<T>());
    }

    /// Enable a transformer by its catalog name
    pub fn bind_transformer_named(&mut self, name: &str) -> Result<(), BindingError> {
        let descriptor = self.binder.catalog.lookup(name)?;
        self.binder.register(descriptor);
        Ok(())
    }

    /// Parameters bound so far
    pub fn parameters(&self) -> &Parameters {
        self.binder.parameters()
    }
}
