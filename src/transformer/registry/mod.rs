//! Transformer registry for collecting descriptors and freezing singletons

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::{TransformerDescriptor, TransformerInstance};
use crate::config::Parameters;
use crate::BindingError;

/// Registry entry for one transformer type
#[derive(Debug, Clone)]
struct RegistryEntry {
    /// Transformer descriptor
    descriptor: TransformerDescriptor,

    /// Modules that bound this transformer, in binding order
    bound_by: Vec<String>,
}

/// Accumulates transformer descriptors during assembly.
///
/// Registering a descriptor twice is a no-op. Singletons are built by
/// [`TransformerRegistry::freeze`], once per descriptor.
#[derive(Debug, Default)]
pub struct TransformerRegistry {
    /// Registered transformers
    entries: HashMap<TypeId, RegistryEntry>,

    /// First-registration order
    order: Vec<TypeId>,
}

impl TransformerRegistry {
    /// Create a new transformer registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer on behalf of `module`
    pub fn register(&mut self, descriptor: TransformerDescriptor, module: &str) {
        match self.entries.get_mut(&descriptor.type_id()) {
            Some(entry) => {
                debug!(
                    "Transformer {} already registered, ignoring duplicate from {}",
                    descriptor, module
                );
                if !entry.bound_by.iter().any(|m| m == module) {
                    entry.bound_by.push(module.to_string());
                }
            }
            None => {
                debug!("Registering transformer {} from {}", descriptor, module);
                self.order.push(descriptor.type_id());
                self.entries.insert(
                    descriptor.type_id(),
                    RegistryEntry {
                        descriptor,
                        bound_by: vec![module.to_string()],
                    },
                );
            }
        }
    }

    pub fn contains(&self, descriptor: &TransformerDescriptor) -> bool {
        self.entries.contains_key(&descriptor.type_id())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Construct every singleton and freeze the set
    pub fn freeze(self, parameters: &Parameters) -> Result<TransformerSet, BindingError> {
        let Self { mut entries, order } = self;
        let mut frozen = Vec::with_capacity(order.len());

        for type_id in order {
            let Some(entry) = entries.remove(&type_id) else {
                continue;
            };
            let instance = entry.descriptor.construct(parameters).map_err(|source| {
                BindingError::ConstructionFailure {
                    type_name: entry.descriptor.type_name().to_string(),
                    source,
                }
            })?;
            debug!("Constructed transformer {}", entry.descriptor);

            frozen.push(FrozenEntry {
                descriptor: entry.descriptor,
                instance,
                bound_by: entry.bound_by,
            });
        }

        info!("Transformer set frozen with {} transformer(s)", frozen.len());

        let instances = frozen.iter().map(|e| Arc::clone(&e.instance)).collect();
        Ok(TransformerSet {
            entries: frozen.into(),
            instances,
        })
    }
}

struct FrozenEntry {
    descriptor: TransformerDescriptor,
    instance: TransformerInstance,
    bound_by: Vec<String>,
}

/// Frozen, read-only set of transformer singletons.
///
/// Cloning shares the same instances.
#[derive(Clone)]
pub struct TransformerSet {
    entries: Arc<[FrozenEntry]>,
    instances: Arc<[TransformerInstance]>,
}

impl Default for TransformerSet {
    fn default() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
            instances: Arc::from(Vec::new()),
        }
    }
}

impl fmt::Debug for TransformerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors()).finish()
    }
}

impl TransformerSet {
    /// All registered singletons. Order is not significant.
    pub fn resolve_all(&self) -> &[TransformerInstance] {
        &self.instances
    }

    /// Descriptor and instance pairs
    pub fn iter(&self) -> impl Iterator<Item = (&TransformerDescriptor, &TransformerInstance)> {
        self.entries.iter().map(|e| (&e.descriptor, &e.instance))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TransformerDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    pub fn get(&self, descriptor: &TransformerDescriptor) -> Option<&TransformerInstance> {
        self.entry(descriptor).map(|e| &e.instance)
    }

    pub fn contains(&self, descriptor: &TransformerDescriptor) -> bool {
        self.entry(descriptor).is_some()
    }

    /// Modules that bound the given transformer
    pub fn bound_by(&self, descriptor: &TransformerDescriptor) -> &[String] {
        self.entry(descriptor)
            .map(|e| e.bound_by.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, descriptor: &TransformerDescriptor) -> Option<&FrozenEntry> {
        self.entries.iter().find(|e| e.descriptor == *descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::Specification;
    use crate::transformer::{FromParameters, SpecificationTransformer};
    use anyhow::Result;

    struct First;
    struct Second;

    impl SpecificationTransformer for First {
        fn transform(&self, _specification: &mut Specification) -> Result<()> {
            Ok(())
        }
    }

    impl FromParameters for First {
        fn from_parameters(_parameters: &Parameters) -> Result<Self> {
            Ok(First)
        }
    }

    impl SpecificationTransformer for Second {
        fn transform(&self, _specification: &mut Specification) -> Result<()> {
            Ok(())
        }
    }

    impl FromParameters for Second {
        fn from_parameters(_parameters: &Parameters) -> Result<Self> {
            Ok(Second)
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = TransformerRegistry::new();
        assert!(registry.is_empty());

        let set = registry.freeze(&Parameters::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.resolve_all().is_empty());
    }

    #[test]
    fn test_duplicate_registration_is_idempotent() {
        let mut registry = TransformerRegistry::new();
        registry.register(TransformerDescriptor::of::<First>(), "a");
        registry.register(TransformerDescriptor::of::<Second>(), "a");
        registry.register(TransformerDescriptor::of::<Second>(), "a");
        registry.register(TransformerDescriptor::of::<Second>(), "b");
        assert_eq!(registry.len(), 2);

        let set = registry.freeze(&Parameters::new()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&TransformerDescriptor::of::<First>()));
        assert_eq!(
            set.bound_by(&TransformerDescriptor::of::<Second>()),
            &["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_resolve_all_is_stable() {
        let mut registry = TransformerRegistry::new();
        registry.register(TransformerDescriptor::of::<First>(), "a");
        let set = registry.freeze(&Parameters::new()).unwrap();

        let first = set.resolve_all()[0].clone();
        let cloned = set.clone();
        assert!(Arc::ptr_eq(&first, &set.resolve_all()[0]));
        assert!(Arc::ptr_eq(&first, &cloned.resolve_all()[0]));
        assert!(Arc::ptr_eq(
            &first,
            set.get(&TransformerDescriptor::of::<First>()).unwrap()
        ));
    }

    #[test]
    fn test_descriptor_identity() {
        assert_eq!(
            TransformerDescriptor::of::<First>(),
            TransformerDescriptor::of::<First>()
        );
        assert_ne!(
            TransformerDescriptor::of::<First>(),
            TransformerDescriptor::of::<Second>()
        );
        assert!(TransformerDescriptor::of::<First>()
            .type_name()
            .ends_with("First"));
    }
}
