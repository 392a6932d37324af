use lazyprov_types::{TypeDescriptor, ValueConsumer};
use tracing::trace;

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

/// Reads from `left` when it has a value, otherwise from `right`.
///
/// The combinator is typed by `left`. Presence always consults both sides; values only force
/// `right` when `left` is missing. Both producers are reported because the side that ends up
/// supplying the value depends on runtime presence.
pub struct OrElseProvider<T: ProviderValue> {
    left: ProviderRef<T>,
    right: ProviderRef<T>,
}

impl<T: ProviderValue> OrElseProvider<T> {
    pub fn new(left: ProviderRef<T>, right: ProviderRef<T>) -> Self {
        Self { left, right }
    }
}

impl<T: ProviderValue> Provider<T> for OrElseProvider<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        self.left.value_type()
    }

    fn compute_presence(&self, consumer: ValueConsumer) -> Result<bool, ProviderError> {
        let left = self.left.presence(consumer)?;
        let right = self.right.presence(consumer)?;
        Ok(left || right)
    }

    fn compute_value(&self, consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        let left = self.left.value(consumer)?;
        if left.is_present() {
            return Ok(left);
        }
        let right = self.right.value(consumer)?;
        if right.is_present() {
            return Ok(right);
        }
        Ok(left.add_paths_from(right))
    }

    fn producer(&self) -> ValueProducer {
        self.left.producer().plus(self.right.producer())
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        let left = self.left.fold_execution_time()?;
        if left.has_fixed_value() {
            return Ok(left);
        }
        let right = self.right.fold_execution_time()?;
        if left.is_missing() {
            return Ok(right);
        }
        if right.is_missing() {
            trace!(provider = %self.left, "fallback folds to nothing; keeping primary residual");
            return Ok(left);
        }
        Ok(ExecutionTimeValue::changing(ProviderRef::new(Self::new(
            left.to_provider(),
            right.to_provider(),
        ))))
    }

    fn describe_self(&self) -> String {
        format!("or({}, {})", self.left, self.right)
    }
}
