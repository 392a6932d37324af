//! Simplified snapshots of provider chains computed at a later phase.
//!
//! Folding lets a configuration-cache pass replace a deep provider chain with the smallest
//! equivalent form: a constant, a reduced chain, or a recorded absence. Folding is eager only
//! over operands the unfolded value contract would already force.

use std::fmt;

use crate::{
    provider::{FixedProvider, MissingProvider, ProviderRef, ProviderValue},
    value::Value,
};

/// Outcome of folding a provider.
#[derive(Clone)]
pub enum ExecutionTimeValue<T: ProviderValue> {
    /// Final value; nothing upstream can change it.
    Fixed(T),
    /// Value still depends on something not yet fixed; holds the residual provider.
    Changing(ProviderRef<T>),
    /// Definitively absent.
    Missing,
}

impl<T: ProviderValue> ExecutionTimeValue<T> {
    pub fn fixed(value: T) -> Self {
        Self::Fixed(value)
    }

    pub fn changing(provider: ProviderRef<T>) -> Self {
        Self::Changing(provider)
    }

    pub fn missing() -> Self {
        Self::Missing
    }

    /// Fixed when `value` is present, missing otherwise.
    pub fn from_value(value: Value<T>) -> Self {
        match value {
            Value::Present(value) => Self::Fixed(value),
            Value::Missing(_) => Self::Missing,
        }
    }

    pub fn has_fixed_value(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_changing(&self) -> bool {
        matches!(self, Self::Changing(_))
    }

    pub fn fixed_value(&self) -> Option<&T> {
        match self {
            Self::Fixed(value) => Some(value),
            _ => None,
        }
    }

    pub fn changing_value(&self) -> Option<&ProviderRef<T>> {
        match self {
            Self::Changing(provider) => Some(provider),
            _ => None,
        }
    }

    /// Converts back into a plain provider.
    ///
    /// A fixed value becomes a new fixed leaf and an absence a new missing leaf, so whatever
    /// wraps the result re-checks it lazily on each access. A changing value yields its residual.
    pub fn to_provider(&self) -> ProviderRef<T> {
        match self {
            Self::Fixed(value) => ProviderRef::new(FixedProvider::new(value.clone())),
            Self::Changing(provider) => provider.clone(),
            Self::Missing => ProviderRef::new(MissingProvider::<T>::new()),
        }
    }

    /// Applies `transform` to a fixed value, or lazily on top of a changing residual.
    pub fn map<U: ProviderValue>(self, transform: impl Fn(&T) -> U + Send + Sync + 'static) -> ExecutionTimeValue<U> {
        match self {
            Self::Fixed(value) => ExecutionTimeValue::Fixed(transform(&value)),
            Self::Changing(provider) => ExecutionTimeValue::Changing(provider.map(transform)),
            Self::Missing => ExecutionTimeValue::Missing,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Changing(_) => "changing",
            Self::Missing => "missing",
        }
    }
}

/// Fixed values compare by value, changing values by residual provider identity.
impl<T: ProviderValue + PartialEq> PartialEq for ExecutionTimeValue<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(left), Self::Fixed(right)) => left == right,
            (Self::Changing(left), Self::Changing(right)) => left.ptr_eq(right),
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}

impl<T: ProviderValue> fmt::Debug for ExecutionTimeValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Changing(provider) => f.debug_tuple("Changing").field(provider).finish(),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyprov_types::ValueConsumer;

    #[test]
    fn from_value_maps_presence_to_fixed_or_missing() {
        assert_eq!(ExecutionTimeValue::from_value(Value::present(3)), ExecutionTimeValue::fixed(3));
        assert!(ExecutionTimeValue::<u8>::from_value(Value::missing_from("x")).is_missing());
    }

    #[test]
    fn fixed_converts_to_a_fresh_fixed_provider() {
        let provider = ExecutionTimeValue::fixed("baz".to_string()).to_provider();
        assert_eq!(provider.get().unwrap(), "baz");
        assert!(provider.describe().starts_with("fixed("));
    }

    #[test]
    fn missing_converts_to_an_absent_provider() {
        let provider = ExecutionTimeValue::<String>::missing().to_provider();
        assert!(!provider.presence(ValueConsumer::DisallowUnsafeRead).unwrap());
    }

    #[test]
    fn changing_returns_its_residual_provider() {
        let residual = ProviderRef::changing(|| Some(1_u32));
        let folded = ExecutionTimeValue::changing(residual.clone());
        assert!(folded.to_provider().ptr_eq(&residual));
        assert_eq!(folded, ExecutionTimeValue::changing(residual));
        assert_eq!(folded.kind(), "changing");
    }

    #[test]
    fn map_keeps_the_fold_shape() {
        assert_eq!(ExecutionTimeValue::fixed(2_u8).map(|value| value * 3), ExecutionTimeValue::fixed(6));
        assert!(ExecutionTimeValue::<u8>::missing().map(|value| value * 3).is_missing());

        let mapped = ExecutionTimeValue::changing(ProviderRef::changing(|| Some(4_u8))).map(|value| value * 3);
        assert_eq!(mapped.changing_value().unwrap().get().unwrap(), 12);
    }
}
