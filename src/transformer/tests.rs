//! Transformer registration tests

use super::*;
use crate::module::{TransformerBinder, TransformerModule};
use crate::{Assembly, BindingError};
use anyhow::anyhow;
use std::sync::atomic::{AtomicUsize, Ordering};

static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

/// Counts its own constructions; only used by `test_singleton_constructed_once`
struct Counted;

impl SpecificationTransformer for Counted {
    fn transform(&self, _specification: &mut Specification) -> Result<()> {
        Ok(())
    }
}

impl FromParameters for Counted {
    fn from_parameters(_parameters: &Parameters) -> Result<Self> {
        CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
        Ok(Counted)
    }
}

static CONSTRUCTED_BEFORE_UNKNOWN: AtomicUsize = AtomicUsize::new(0);

/// Counts its own constructions; only used by `test_unknown_name_fails_before_construction`
struct CountedBeforeUnknown;

impl SpecificationTransformer for CountedBeforeUnknown {
    fn transform(&self, _specification: &mut Specification) -> Result<()> {
        Ok(())
    }
}

impl FromParameters for CountedBeforeUnknown {
    fn from_parameters(_parameters: &Parameters) -> Result<Self> {
        CONSTRUCTED_BEFORE_UNKNOWN.fetch_add(1, Ordering::SeqCst);
        Ok(CountedBeforeUnknown)
    }
}

struct Broken;

impl SpecificationTransformer for Broken {
    fn transform(&self, _specification: &mut Specification) -> Result<()> {
        Ok(())
    }
}

impl FromParameters for Broken {
    fn from_parameters(_parameters: &Parameters) -> Result<Self> {
        Err(anyhow!("solver backend unavailable"))
    }
}

struct CountedTwice;

impl TransformerModule for CountedTwice {
    fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
        binder.bind_transformer::<Counted>();
        binder.bind_transformer::<Counted>();
        Ok(())
    }
}

struct CountedAgain;

impl TransformerModule for CountedAgain {
    fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
        binder.bind_transformer::<Counted>();
        Ok(())
    }
}

struct BindsBroken;

impl TransformerModule for BindsBroken {
    fn name(&self) -> &str {
        "binds-broken"
    }

    fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
        binder.bind_transformer::<Broken>();
        Ok(())
    }
}

#[test]
fn test_singleton_constructed_once() {
    let assembled = Assembly::new()
        .install(CountedTwice)
        .install(CountedAgain)
        .assemble()
        .unwrap();

    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    assert_eq!(assembled.transformers().len(), 1);

    let descriptor = TransformerDescriptor::of::<Counted>();
    assert_eq!(assembled.transformers().bound_by(&descriptor).len(), 2);
}

#[test]
fn test_construction_failure_names_type() {
    let err = Assembly::new().install(BindsBroken).assemble().unwrap_err();

    match err.binding_error() {
        Some(BindingError::ConstructionFailure { type_name, .. }) => {
            assert!(type_name.ends_with("Broken"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("solver backend unavailable"));
}

#[test]
fn test_builtin_missing_parameter_fails_assembly() {
    struct NeedsNamespace;

    impl TransformerModule for NeedsNamespace {
        fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
            binder.bind_transformer::<Namespace>();
            Ok(())
        }
    }

    let err = Assembly::new().install(NeedsNamespace).assemble().unwrap_err();
    assert!(err.to_string().contains("Missing required parameter 'namespace'"));
}

#[test]
fn test_typed_and_named_binding_share_instance() {
    struct Typed;
    struct Named;

    impl TransformerModule for Typed {
        fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
            binder.bind_transformer::<AttributeDefaults>();
            Ok(())
        }
    }

    impl TransformerModule for Named {
        fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
            binder.bind_transformer_named(AttributeDefaults::NAME)?;
            Ok(())
        }
    }

    let assembled = Assembly::new()
        .install(Typed)
        .install(Named)
        .assemble()
        .unwrap();

    assert_eq!(assembled.transformers().len(), 1);
    assert!(assembled
        .transformers()
        .contains(&TransformerDescriptor::of::<AttributeDefaults>()));
}

#[test]
fn test_unknown_name_fails_before_construction() {
    struct BindsCounted;
    struct BindsUnknown;

    impl TransformerModule for BindsCounted {
        fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
            binder.bind_transformer::<CountedBeforeUnknown>();
            Ok(())
        }
    }

    impl TransformerModule for BindsUnknown {
        fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
            binder.bind_transformer_named("unknown")?;
            Ok(())
        }
    }

    let err = Assembly::new()
        .install(BindsCounted)
        .install(BindsUnknown)
        .assemble()
        .unwrap_err();

    assert!(matches!(
        err.binding_error(),
        Some(BindingError::InvalidTransformerType { name }) if name == "unknown"
    ));
    assert_eq!(CONSTRUCTED_BEFORE_UNKNOWN.load(Ordering::SeqCst), 0);
}
