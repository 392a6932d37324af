use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

type Compute<T> = Box<dyn Fn() -> anyhow::Result<Option<T>> + Send + Sync>;

/// Leaf backed by a closure that is re-run on every query.
///
/// Its value may differ between calls, so folding never fixes it. Closure failures surface as
/// [`ProviderError::Leaf`].
pub struct ChangingProvider<T> {
    compute: Compute<T>,
    display_name: Option<String>,
}

impl<T: ProviderValue> ChangingProvider<T> {
    pub fn new(compute: impl Fn() -> Option<T> + Send + Sync + 'static) -> Self {
        Self::fallible(move || Ok(compute()))
    }

    /// Leaf whose closure can fail.
    pub fn fallible(compute: impl Fn() -> anyhow::Result<Option<T>> + Send + Sync + 'static) -> Self {
        Self {
            compute: Box::new(compute),
            display_name: None,
        }
    }

    pub fn with_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl<T: ProviderValue> Provider<T> for ChangingProvider<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        None
    }

    fn compute_value(&self, _consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        Ok(match (self.compute)()? {
            Some(value) => Value::present(value),
            None => Value::missing_from(self.describe_self()),
        })
    }

    fn producer(&self) -> ValueProducer {
        ValueProducer::unknown()
    }

    fn compute_execution_time_value(&self, this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(ExecutionTimeValue::changing(this.clone()))
    }

    fn describe_self(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => format!("changing({})", TypeDescriptor::of::<T>().short_name()),
        }
    }
}
