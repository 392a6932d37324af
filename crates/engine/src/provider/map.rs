use std::sync::Arc;

use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

type Transform<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;

/// Applies a pure transform to each value of its source.
pub struct MapProvider<S: ProviderValue, T> {
    source: ProviderRef<S>,
    transform: Transform<S, T>,
}

impl<S: ProviderValue, T: ProviderValue> MapProvider<S, T> {
    pub fn new(source: ProviderRef<S>, transform: impl Fn(&S) -> T + Send + Sync + 'static) -> Self {
        Self {
            source,
            transform: Arc::new(transform),
        }
    }
}

impl<S: ProviderValue, T: ProviderValue> Provider<T> for MapProvider<S, T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        None
    }

    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        self.source.presence(consumer)
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        Ok(self.source.value(consumer)?.map(|value| (self.transform)(&value)))
    }

    fn producer(&self) -> ValueProducer {
        self.source.producer()
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(match self.source.fold_execution_time()? {
            ExecutionTimeValue::Fixed(value) => ExecutionTimeValue::fixed((self.transform)(&value)),
            ExecutionTimeValue::Missing => ExecutionTimeValue::missing(),
            ExecutionTimeValue::Changing(residual) => ExecutionTimeValue::changing(ProviderRef::new(Self {
                source: residual,
                transform: Arc::clone(&self.transform),
            })),
        })
    }

    fn describe_self(&self) -> String {
        format!("map({})", self.source)
    }
}
