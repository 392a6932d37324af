use std::sync::Arc;

use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

type Transform<S, T> = Arc<dyn Fn(&S) -> ProviderRef<T> + Send + Sync>;

/// Chooses the provider to read from based on the value of its source.
///
/// The producing tasks of the chosen provider are only known once the source is realized, so the
/// producer reports them as unknown.
pub struct FlatMapProvider<S: ProviderValue, T: ProviderValue> {
    source: ProviderRef<S>,
    transform: Transform<S, T>,
}

impl<S: ProviderValue, T: ProviderValue> FlatMapProvider<S, T> {
    pub fn new(source: ProviderRef<S>, transform: impl Fn(&S) -> ProviderRef<T> + Send + Sync + 'static) -> Self {
        Self {
            source,
            transform: Arc::new(transform),
        }
    }
}

impl<S: ProviderValue, T: ProviderValue> Provider<T> for FlatMapProvider<S, T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        None
    }

    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        match self.source.value(consumer)? {
            Value::Present(value) => (self.transform)(&value).presence(consumer),
            Value::Missing(_) => Ok(false),
        }
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        match self.source.value(consumer)? {
            Value::Present(value) => (self.transform)(&value).value(consumer),
            Value::Missing(diagnostic) => Ok(Value::missing(diagnostic)),
        }
    }

    fn producer(&self) -> ValueProducer {
        self.source.producer().plus(ValueProducer::unknown())
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(match self.source.fold_execution_time()? {
            ExecutionTimeValue::Fixed(value) => (self.transform)(&value).fold_execution_time()?,
            ExecutionTimeValue::Missing => ExecutionTimeValue::missing(),
            ExecutionTimeValue::Changing(residual) => ExecutionTimeValue::changing(ProviderRef::new(Self {
                source: residual,
                transform: Arc::clone(&self.transform),
            })),
        })
    }

    fn describe_self(&self) -> String {
        format!("flatMap({})", self.source)
    }
}
