//! DSE Transform Library
//!
//! Registration and application of specification transformers for
//! design-space exploration. Deployments install modules into an
//! [`Assembly`]; transformer modules bind transformer types, each of which is
//! constructed exactly once when the assembly completes. The resulting
//! [`TransformerSet`] is frozen and handed to a [`TransformStage`] that
//! applies every transformer to the specifications under exploration.

pub mod cli;
pub mod config;
pub mod module;
pub mod specification;
pub mod stage;
pub mod transformer;
pub mod utils;

pub use config::{Parameters, TransformConfig};
pub use module::{Binder, ExplorationModule, TransformerBinder, TransformerModule};
pub use specification::{Element, Specification};
pub use stage::{StageReport, TransformStage};
pub use transformer::{
    FromParameters, SpecificationTransformer, TransformerCatalog, TransformerDescriptor,
    TransformerInstance, TransformerRegistry, TransformerSet,
};

use tracing::{debug, info};

/// Configuration under assembly.
///
/// Owns the transformer registry for exactly one configuration, so separate
/// assemblies never share transformer sets.
pub struct Assembly {
    catalog: TransformerCatalog,
    parameters: Parameters,
    modules: Vec<Box<dyn ExplorationModule>>,
}

impl Assembly {
    /// Create an assembly using the built-in transformer catalog
    pub fn new() -> Self {
        Self::with_catalog(TransformerCatalog::with_builtins())
    }

    /// Create an assembly resolving transformer names through `catalog`
    pub fn with_catalog(catalog: TransformerCatalog) -> Self {
        Self {
            catalog,
            parameters: Parameters::new(),
            modules: Vec::new(),
        }
    }

    /// Install a module
    pub fn install(mut self, module: impl ExplorationModule + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Install an already boxed module
    pub fn install_boxed(mut self, module: Box<dyn ExplorationModule>) -> Self {
        self.modules.push(module);
        self
    }

    /// Configure every module once, then construct and freeze the transformers
    pub fn assemble(self) -> Result<AssembledConfiguration, AssemblyError> {
        let Self {
            catalog,
            mut parameters,
            modules,
        } = self;
        let mut registry = TransformerRegistry::new();

        info!("Assembling configuration from {} module(s)", modules.len());

        for module in &modules {
            let name = module.name().to_string();
            let mut binder = Binder::new(&name, &mut parameters, &mut registry, &catalog);
            module
                .configure(&mut binder)
                .map_err(|source| AssemblyError::Module {
                    module: name.clone(),
                    source,
                })?;
            debug!("Configured module {}", name);
        }

        let transformers = registry.freeze(&parameters)?;

        info!(
            "Configuration assembled: {} parameter(s), {} transformer(s)",
            parameters.len(),
            transformers.len()
        );

        Ok(AssembledConfiguration {
            catalog,
            parameters,
            transformers,
        })
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen result of an assembly
#[derive(Debug, Clone)]
pub struct AssembledConfiguration {
    catalog: TransformerCatalog,
    parameters: Parameters,
    transformers: TransformerSet,
}

impl AssembledConfiguration {
    pub fn transformers(&self) -> &TransformerSet {
        &self.transformers
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn catalog(&self) -> &TransformerCatalog {
        &self.catalog
    }

    /// Build the stage that applies the assembled transformers
    pub fn stage(&self) -> TransformStage {
        TransformStage::new(self.transformers.clone())
    }
}

/// Errors raised while binding or constructing transformers
#[derive(thiserror::Error, Debug)]
pub enum BindingError {
    #[error("Invalid transformer type: '{name}' is not a known specification transformer")]
    InvalidTransformerType { name: String },

    #[error("Failed to construct transformer {type_name}: {source:#}")]
    ConstructionFailure {
        type_name: String,
        source: anyhow::Error,
    },

    #[error("Missing required parameter '{key}'")]
    MissingParameter { key: String },

    #[error("Invalid value for parameter '{key}': {source}")]
    InvalidParameter {
        key: String,
        source: serde_yaml::Error,
    },
}

/// Errors that abort assembly
#[derive(thiserror::Error, Debug)]
pub enum AssemblyError {
    #[error("Module {module} failed to configure: {source:#}")]
    Module {
        module: String,
        source: anyhow::Error,
    },

    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl AssemblyError {
    /// Underlying binding error, if the failure was one
    pub fn binding_error(&self) -> Option<&BindingError> {
        match self {
            AssemblyError::Module { source, .. } => source.downcast_ref::<BindingError>(),
            AssemblyError::Binding(err) => Some(err),
        }
    }
}

/// A transformer failed while being applied to a specification
#[derive(thiserror::Error, Debug)]
#[error("Transformer {transformer} failed on specification '{specification}': {source:#}")]
pub struct TransformError {
    pub transformer: String,
    pub specification: String,
    pub source: anyhow::Error,
}
