use std::sync::Arc;

use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

type Combine<A, B, T> = Arc<dyn Fn(&A, &B) -> T + Send + Sync>;

/// Combines the values of two providers. Missing when either side is missing.
pub struct ZipProvider<A: ProviderValue, B: ProviderValue, T> {
    left: ProviderRef<A>,
    right: ProviderRef<B>,
    combine: Combine<A, B, T>,
}

impl<A: ProviderValue, B: ProviderValue, T: ProviderValue> ZipProvider<A, B, T> {
    pub fn new(left: ProviderRef<A>, right: ProviderRef<B>, combine: impl Fn(&A, &B) -> T + Send + Sync + 'static) -> Self {
        Self {
            left,
            right,
            combine: Arc::new(combine),
        }
    }
}

impl<A: ProviderValue, B: ProviderValue, T: ProviderValue> Provider<T> for ZipProvider<A, B, T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        None
    }

    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        Ok(self.left.presence(consumer)? && self.right.presence(consumer)?)
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        let left = match self.left.value(consumer)? {
            Value::Present(value) => value,
            Value::Missing(diagnostic) => return Ok(Value::missing(diagnostic)),
        };
        Ok(self.right.value(consumer)?.map(|right| (self.combine)(&left, &right)))
    }

    fn producer(&self) -> ValueProducer {
        self.left.producer().plus(self.right.producer())
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        let left = self.left.fold_execution_time()?;
        if left.is_missing() {
            return Ok(ExecutionTimeValue::missing());
        }
        let right = self.right.fold_execution_time()?;
        Ok(match (left, right) {
            (_, ExecutionTimeValue::Missing) => ExecutionTimeValue::missing(),
            (ExecutionTimeValue::Fixed(left), ExecutionTimeValue::Fixed(right)) => {
                ExecutionTimeValue::fixed((self.combine)(&left, &right))
            }
            (left, right) => ExecutionTimeValue::changing(ProviderRef::new(Self {
                left: left.to_provider(),
                right: right.to_provider(),
                combine: Arc::clone(&self.combine),
            })),
        })
    }

    fn describe_self(&self) -> String {
        format!("zip({}, {})", self.left, self.right)
    }
}
