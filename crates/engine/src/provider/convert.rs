use std::marker::PhantomData;

use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

/// Presents a provider of `U` as a provider of an assignable type `T`.
///
/// Queries, producers and descriptions are forwarded unchanged; only values are converted. The
/// reported type stays the source's, which is what the underlying provider actually yields.
pub struct ConvertedProvider<U: ProviderValue, T> {
    source: ProviderRef<U>,
    _target: PhantomData<fn() -> T>,
}

impl<U, T> ConvertedProvider<U, T>
where
    U: ProviderValue + Into<T>,
    T: ProviderValue,
{
    pub fn new(source: ProviderRef<U>) -> Self {
        Self {
            source,
            _target: PhantomData,
        }
    }
}

impl<U, T> Provider<T> for ConvertedProvider<U, T>
where
    U: ProviderValue + Into<T>,
    T: ProviderValue,
{
    fn value_type(&self) -> Option<TypeDescriptor> {
        self.source.value_type()
    }

    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        self.source.presence(consumer)
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        Ok(self.source.value(consumer)?.map(Into::into))
    }

    fn producer(&self) -> ValueProducer {
        self.source.producer()
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(match self.source.fold_execution_time()? {
            ExecutionTimeValue::Fixed(value) => ExecutionTimeValue::fixed(value.into()),
            ExecutionTimeValue::Missing => ExecutionTimeValue::missing(),
            ExecutionTimeValue::Changing(residual) => ExecutionTimeValue::changing(ProviderRef::new(Self::new(residual))),
        })
    }

    fn describe_self(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_values_and_keeps_source_type() {
        let widened: ProviderRef<u64> = ProviderRef::fixed(7_u32).upcast();
        assert_eq!(widened.get().unwrap(), 7_u64);
        assert!(widened.value_type().unwrap().is::<u32>());
        assert_eq!(widened.describe(), "fixed(u32, 7)");
        assert_eq!(widened.fold_execution_time().unwrap(), ExecutionTimeValue::fixed(7_u64));
    }

    #[test]
    fn missing_source_stays_missing() {
        let widened: ProviderRef<String> = ProviderRef::<&'static str>::missing_named("property 'name'").upcast();
        assert!(!widened.is_present().unwrap());
        assert!(widened.fold_execution_time().unwrap().is_missing());
    }
}
