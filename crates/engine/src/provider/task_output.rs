use lazyprov_types::{TypeDescriptor, ValueConsumer};
use tracing::debug;

use super::{Provider, ProviderRef, ProviderValue};
use crate::{
    error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, task::TaskHandle, value::Value,
};

type ReadOutput<T> = Box<dyn Fn() -> anyhow::Result<T> + Send + Sync>;

/// Leaf whose value is a declared output of a build action.
///
/// A declared output is always present, so presence never reads it. Reading the value before the
/// task has completed is refused unless the consumer permits unsafe reads. The producer is the
/// task itself, so wiring this provider into another task's input creates a dependency on it.
pub struct TaskOutputProvider<T> {
    task: TaskHandle,
    read: ReadOutput<T>,
}

impl<T: ProviderValue> TaskOutputProvider<T> {
    pub fn new(task: TaskHandle, read: impl Fn() -> anyhow::Result<T> + Send + Sync + 'static) -> Self {
        Self {
            task,
            read: Box::new(read),
        }
    }

    fn ensure_readable(&self, consumer: ValueConsumer) -> Result<(), ProviderError> {
        if self.task.is_completed() || consumer.permits_unsafe_read() {
            return Ok(());
        }
        debug!(task = %self.task.path(), consumer = %consumer, "refusing read of incomplete task output");
        Err(ProviderError::UnsafeRead {
            provider: self.describe_self(),
            task: self.task.path().clone(),
        })
    }
}

impl<T: ProviderValue> Provider<T> for TaskOutputProvider<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<T>())
    }

    fn compute_presence(&self, _consumer: ValueConsumer) -> Result<bool, ProviderError> {
        Ok(true)
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        self.ensure_readable(consumer)?;
        Ok(Value::present((self.read)()?))
    }

    fn producer(&self) -> ValueProducer {
        ValueProducer::task(self.task.clone())
    }

    fn compute_execution_time_value(&self, this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(ExecutionTimeValue::changing(this.clone()))
    }

    fn describe_self(&self) -> String {
        format!("output({})", self.task.path())
    }
}
