use lazyprov_types::{TypeDescriptor, ValueConsumer};

use super::{Provider, ProviderRef, ProviderValue};
use crate::{error::ProviderError, execution_time::ExecutionTimeValue, producer::ValueProducer, value::Value};

/// Leaf holding a constant value.
pub struct FixedProvider<T> {
    value: T,
}

impl<T: ProviderValue> FixedProvider<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: ProviderValue> Provider<T> for FixedProvider<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<T>())
    }

    fn compute_presence(&self, _consumer: ValueConsumer) -> Result<bool, ProviderError> {
        Ok(true)
    }

    fn compute_value(&self, _consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        Ok(Value::present(self.value.clone()))
    }

    fn producer(&self) -> ValueProducer {
        ValueProducer::none()
    }

    fn compute_execution_time_value(&self, _this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        Ok(ExecutionTimeValue::fixed(self.value.clone()))
    }

    fn describe_self(&self) -> String {
        format!("fixed({}, {:?})", TypeDescriptor::of::<T>().short_name(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_present_and_folds_to_itself() {
        let provider = ProviderRef::fixed(vec![1_u8, 2]);
        assert!(provider.is_present().unwrap());
        assert_eq!(provider.get().unwrap(), vec![1, 2]);
        assert_eq!(provider.fold_execution_time().unwrap(), ExecutionTimeValue::fixed(vec![1, 2]));
        assert!(matches!(provider.producer(), ValueProducer::NoProducer));
    }

    #[test]
    fn describes_type_and_value() {
        assert_eq!(ProviderRef::fixed("foo".to_string()).describe(), "fixed(String, \"foo\")");
        assert_eq!(ProviderRef::fixed(vec![3_u32]).describe(), "fixed(Vec<u32>, [3])");
        assert!(ProviderRef::fixed(1_i64).value_type().unwrap().is::<i64>());
    }
}
