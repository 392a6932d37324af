use std::marker::PhantomData;

use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

/// Leaf that never has a value.
///
/// An optional display name stands in for the description, which is how unset properties show up
/// in missing-value reports.
pub struct MissingProvider<T> {
    display_name: Option<String>,
    _value: PhantomData<fn() -> T>,
}

impl<T: ProviderValue> MissingProvider<T> {
    pub fn new() -> Self {
        Self {
            display_name: None,
            _value: PhantomData,
        }
    }

    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            _value: PhantomData,
        }
    }
}

impl<T: ProviderValue> Default for MissingProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ProviderValue> Provider<T> for MissingProvider<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<T>())
    }

    fn compute_presence(&self, _consumer: ValueConsumer) -> Result<bool, ProviderError> {
        Ok(false)
    }

    fn compute_value(&self, _consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        Ok(Value::missing_from(self.describe_self()))
    }

    fn producer(&self) -> ValueProducer {
        ValueProducer::none()
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(ExecutionTimeValue::missing())
    }

    fn describe_self(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => format!("missing({})", TypeDescriptor::of::<T>().short_name()),
        }
    }
}
