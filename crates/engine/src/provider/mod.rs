//! The provider contract and the shared handle every combinator is built from.
//!
//! Modules:
//! - `fixed` / `missing`: constant leaves
//! - `changing`: closure-backed leaf re-evaluated on every query
//! - `task_output`: leaf whose value is produced by a build action
//! - `map`, `flat_map`, `zip`, `or_else`: combinators
//! - `convert`: adapter for assignable value types

mod changing;
mod convert;
mod fixed;
mod flat_map;
mod map;
mod missing;
mod or_else;
mod task_output;
mod zip;

use std::{
    fmt,
    sync::{Arc, Weak},
};

use lazyprov_types::{TypeDescriptor, ValueConsumer};

pub use changing::ChangingProvider;
pub use convert::ConvertedProvider;
pub use fixed::FixedProvider;
pub use flat_map::FlatMapProvider;
pub use map::MapProvider;
pub use missing::MissingProvider;
pub use or_else::OrElseProvider;
pub use task_output::TaskOutputProvider;
pub use zip::ZipProvider;

use crate::{error::ProviderError, execution_time::ExecutionTimeValue, guard, producer::ValueProducer, value::Value};

/// Bound shared by every value a provider can yield.
pub trait ProviderValue: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> ProviderValue for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

/// Contract implemented by every leaf and combinator.
///
/// Implementations are immutable once constructed and never memoize: each query re-walks the
/// operands. Operands are held as [`ProviderRef`]s and must be queried through them so the
/// reentrancy guards apply. Callers never use these methods directly; they go through
/// [`ProviderRef`], which exposes the guarded forms.
pub trait Provider<T: ProviderValue>: Send + Sync {
    /// Best-effort static type of the value, `None` when unknown at composition time.
    fn value_type(&self) -> Option<TypeDescriptor>;

    /// Whether forcing would yield a value. Must agree with [`Provider::compute_value`] and be
    /// no more expensive; a missing result is `Ok(false)`, never an error.
    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        Ok(self.compute_value(consumer)?.is_present())
    }

    /// Materializes the value, forcing only the operands needed for the result.
    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError>;

    /// Build actions producing the value, derived from structure alone.
    fn producer(&self) -> ValueProducer;

    /// Folds this provider into its execution-time form. `this` is the shared handle through
    /// which the provider is being folded, so a leaf can hand itself back as the residual.
    fn compute_execution_time_value(&self, this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError>;

    /// Human-readable description. Operand descriptions must be obtained through
    /// [`ProviderRef::describe`] (or `Display`) so cycles are cut.
    fn describe_self(&self) -> String;
}

/// Shared, reference-counted handle on a provider.
///
/// Cloning is cheap and shares the underlying node. Equality is node identity.
pub struct ProviderRef<T: ProviderValue> {
    inner: Arc<dyn Provider<T>>,
}

impl<T: ProviderValue> ProviderRef<T> {
    pub fn new(provider: impl Provider<T> + 'static) -> Self {
        Self { inner: Arc::new(provider) }
    }

    pub fn from_arc(inner: Arc<dyn Provider<T>>) -> Self {
        Self { inner }
    }

    /// Provider that always yields `value`.
    pub fn fixed(value: T) -> Self {
        Self::new(FixedProvider::new(value))
    }

    /// Provider that never yields a value.
    pub fn missing() -> Self {
        Self::new(MissingProvider::new())
    }

    /// Provider that never yields a value and names itself `display_name` in diagnostics.
    pub fn missing_named(display_name: impl Into<String>) -> Self {
        Self::new(MissingProvider::named(display_name))
    }

    /// Provider re-running `compute` on every query.
    pub fn changing(compute: impl Fn() -> Option<T> + Send + Sync + 'static) -> Self {
        Self::new(ChangingProvider::new(compute))
    }

    fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }

    /// `true` when both handles share the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }

    /// Non-owning handle, for back-references that must not keep the node alive.
    pub fn downgrade(&self) -> WeakProviderRef<T> {
        WeakProviderRef {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn value_type(&self) -> Option<TypeDescriptor> {
        self.inner.value_type()
    }

    pub fn presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        guard::evaluation_guarded(self.identity(), || self.describe(), || self.inner.compute_presence(consumer))
    }

    pub fn value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        guard::evaluation_guarded(self.identity(), || self.describe(), || self.inner.compute_value(consumer))
    }

    pub fn producer(&self) -> ValueProducer {
        self.inner.producer()
    }

    pub fn fold_execution_time(&self) -> Result<ExecutionTimeValue<T>, ProviderError> {
        guard::evaluation_guarded(
            self.identity(),
            || self.describe(),
            || self.inner.compute_execution_time_value(self),
        )
    }

    /// Cycle-safe description; a provider already being described on this thread renders as
    /// [`CIRCULAR_REFERENCE`](crate::CIRCULAR_REFERENCE).
    pub fn describe(&self) -> String {
        guard::render_guarded(self.identity(), || self.inner.describe_self())
    }

    /// Presence, permitting unsafe reads.
    pub fn is_present(&self) -> Result<bool, ProviderError> {
        self.presence(ValueConsumer::IgnoreUnsafeRead)
    }

    /// The value, permitting unsafe reads. A missing value is an error naming every
    /// contributing provider.
    pub fn get(&self) -> Result<T, ProviderError> {
        self.get_with(ValueConsumer::IgnoreUnsafeRead)
    }

    pub fn get_with(&self, consumer: ValueConsumer) -> Result<T, ProviderError> {
        Ok(self.value(consumer)?.into_result(|| self.describe())?)
    }

    pub fn get_or_none(&self) -> Result<Option<T>, ProviderError> {
        Ok(self.value(ValueConsumer::IgnoreUnsafeRead)?.into_option())
    }

    pub fn get_or_else(&self, default: T) -> Result<T, ProviderError> {
        Ok(self.get_or_none()?.unwrap_or(default))
    }

    pub fn map<U: ProviderValue>(&self, transform: impl Fn(&T) -> U + Send + Sync + 'static) -> ProviderRef<U> {
        ProviderRef::new(MapProvider::new(self.clone(), transform))
    }

    pub fn flat_map<U: ProviderValue>(
        &self,
        transform: impl Fn(&T) -> ProviderRef<U> + Send + Sync + 'static,
    ) -> ProviderRef<U> {
        ProviderRef::new(FlatMapProvider::new(self.clone(), transform))
    }

    pub fn zip<B: ProviderValue, U: ProviderValue>(
        &self,
        right: &ProviderRef<B>,
        combine: impl Fn(&T, &B) -> U + Send + Sync + 'static,
    ) -> ProviderRef<U> {
        ProviderRef::new(ZipProvider::new(self.clone(), right.clone(), combine))
    }

    /// Falls back to `right` when this provider has no value.
    pub fn or_else(&self, right: &ProviderRef<T>) -> ProviderRef<T> {
        ProviderRef::new(OrElseProvider::new(self.clone(), right.clone()))
    }

    /// Falls back to a constant when this provider has no value.
    pub fn or_else_value(&self, value: T) -> ProviderRef<T> {
        self.or_else(&ProviderRef::fixed(value))
    }

    /// Falls back to a provider of an assignable type. The result keeps this provider's type.
    pub fn or_else_from<U>(&self, right: &ProviderRef<U>) -> ProviderRef<T>
    where
        U: ProviderValue + Into<T>,
    {
        self.or_else(&right.upcast())
    }

    /// Views this provider as a provider of `U`, converting each value with `Into`.
    pub fn upcast<U>(&self) -> ProviderRef<U>
    where
        U: ProviderValue,
        T: Into<U>,
    {
        ProviderRef::new(ConvertedProvider::new(self.clone()))
    }
}

impl<T: ProviderValue> Clone for ProviderRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ProviderValue> PartialEq for ProviderRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ProviderValue> Eq for ProviderRef<T> {}

impl<T: ProviderValue> fmt::Display for ProviderRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<T: ProviderValue> fmt::Debug for ProviderRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderRef").field(&self.describe()).finish()
    }
}

/// Weak counterpart of [`ProviderRef`].
pub struct WeakProviderRef<T: ProviderValue> {
    inner: Weak<dyn Provider<T>>,
}

impl<T: ProviderValue> WeakProviderRef<T> {
    /// The provider, if any strong handle still holds it.
    pub fn upgrade(&self) -> Option<ProviderRef<T>> {
        self.inner.upgrade().map(ProviderRef::from_arc)
    }
}

impl<T: ProviderValue> Clone for WeakProviderRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CIRCULAR_REFERENCE;
    use std::sync::OnceLock;

    /// Leaf that forwards to a provider bound after construction through a weak handle.
    struct LateBound {
        target: Arc<OnceLock<WeakProviderRef<String>>>,
    }

    impl Provider<String> for LateBound {
        fn value_type(&self) -> Option<TypeDescriptor> {
            None
        }

        fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<String>, ProviderError> {
            match self.target.get().and_then(WeakProviderRef::upgrade) {
                Some(target) => target.value(consumer),
                None => Ok(Value::missing_from("late(unbound)")),
            }
        }

        fn producer(&self) -> ValueProducer {
            ValueProducer::unknown()
        }

        fn compute_execution_time_value(&self, this: &ProviderRef<String>) -> Result<ExecutionTimeValue<String>, ProviderError> {
            Ok(ExecutionTimeValue::changing(this.clone()))
        }

        fn describe_self(&self) -> String {
            match self.target.get().and_then(WeakProviderRef::upgrade) {
                Some(target) => format!("late({target})"),
                None => "late(unbound)".into(),
            }
        }
    }

    fn self_referencing_or_else() -> ProviderRef<String> {
        let target = Arc::new(OnceLock::new());
        let late = ProviderRef::new(LateBound { target: target.clone() });
        let combined = late.or_else_value("fallback".to_string());
        assert!(target.set(combined.downgrade()).is_ok());
        combined
    }

    #[test]
    fn self_reference_renders_placeholder() {
        let combined = self_referencing_or_else();
        assert_eq!(
            combined.describe(),
            format!("or(late({CIRCULAR_REFERENCE}), fixed(String, \"fallback\"))")
        );
        assert_eq!(combined.describe(), combined.to_string());
    }

    #[test]
    fn self_reference_fails_evaluation_instead_of_recursing() {
        let combined = self_referencing_or_else();
        let error = combined.get().unwrap_err();
        assert!(matches!(error, ProviderError::CircularEvaluation { .. }));
        assert!(combined.is_present().is_err());
    }

    #[test]
    fn get_reports_missing_chain() {
        let provider = ProviderRef::<String>::missing_named("property 'version'").map(|value| value.to_uppercase());
        let missing = match provider.get().unwrap_err() {
            ProviderError::Missing(missing) => missing,
            other => panic!("expected a missing-value error, got {other:?}"),
        };
        assert_eq!(missing.provider(), "map(property 'version')");
        assert_eq!(missing.diagnostic().paths(), ["property 'version'".to_string()]);
    }

    #[test]
    fn get_or_else_substitutes_default() {
        assert_eq!(ProviderRef::<u32>::missing().get_or_else(5).unwrap(), 5);
        assert_eq!(ProviderRef::fixed(1_u32).get_or_else(5).unwrap(), 1);
        assert_eq!(ProviderRef::<u32>::missing().get_or_none().unwrap(), None);
    }

    #[test]
    fn handles_compare_by_identity() {
        let provider = ProviderRef::fixed(1_u8);
        assert_eq!(provider, provider.clone());
        assert_ne!(provider, ProviderRef::fixed(1_u8));
        assert!(provider.downgrade().upgrade().unwrap().ptr_eq(&provider));
    }
}
