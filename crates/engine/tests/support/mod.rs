#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use lazyprov_engine::{
    ExecutionTimeValue, Provider, ProviderError, ProviderRef, ProviderValue, TypeDescriptor, Value, ValueConsumer,
    ValueProducer,
};

/// How often each query reached a probe.
#[derive(Debug, Default)]
pub struct ProbeCounters {
    presence: AtomicUsize,
    value: AtomicUsize,
    fold: AtomicUsize,
    producer: AtomicUsize,
}

impl ProbeCounters {
    pub fn presence(&self) -> usize {
        self.presence.load(Ordering::SeqCst)
    }

    pub fn value(&self) -> usize {
        self.value.load(Ordering::SeqCst)
    }

    pub fn fold(&self) -> usize {
        self.fold.load(Ordering::SeqCst)
    }

    pub fn producer(&self) -> usize {
        self.producer.load(Ordering::SeqCst)
    }

    /// Number of times the probe was forced for a value or folded.
    pub fn forced(&self) -> usize {
        self.value() + self.fold()
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Fixed,
    Changing,
}

/// Leaf that records every query it receives.
pub struct Probe<T> {
    name: String,
    value: Option<T>,
    shape: Shape,
    counters: Arc<ProbeCounters>,
}

impl<T: ProviderValue> Probe<T> {
    /// Present value that folds to a fixed value.
    pub fn present(name: &str, value: T) -> (ProviderRef<T>, Arc<ProbeCounters>) {
        Self::build(name, Some(value), Shape::Fixed)
    }

    /// Absent value that folds to missing.
    pub fn missing(name: &str) -> (ProviderRef<T>, Arc<ProbeCounters>) {
        Self::build(name, None, Shape::Fixed)
    }

    /// Present value whose fold stays changing.
    pub fn changing(name: &str, value: T) -> (ProviderRef<T>, Arc<ProbeCounters>) {
        Self::build(name, Some(value), Shape::Changing)
    }

    fn build(name: &str, value: Option<T>, shape: Shape) -> (ProviderRef<T>, Arc<ProbeCounters>) {
        let counters = Arc::new(ProbeCounters::default());
        let probe = Self {
            name: name.to_string(),
            value,
            shape,
            counters: counters.clone(),
        };
        (ProviderRef::new(probe), counters)
    }
}

impl<T: ProviderValue> Provider<T> for Probe<T> {
    fn value_type(&self) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<T>())
    }

    fn compute_presence(&self, _consumer: ValueConsumer) -> Result<bool, ProviderError> {
        self.counters.presence.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.is_some())
    }

    fn compute_value(&self, _consumer: ValueConsumer) -> Result<Value<T>, ProviderError> {
        self.counters.value.fetch_add(1, Ordering::SeqCst);
        Ok(match &self.value {
            Some(value) => Value::present(value.clone()),
            None => Value::missing_from(self.name.clone()),
        })
    }

    fn producer(&self) -> ValueProducer {
        self.counters.producer.fetch_add(1, Ordering::SeqCst);
        ValueProducer::none()
    }

    fn compute_execution_time_value(&self, this: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        self.counters.fold.fetch_add(1, Ordering::SeqCst);
        Ok(match (self.shape, &self.value) {
            (_, None) => ExecutionTimeValue::missing(),
            (Shape::Fixed, Some(value)) => ExecutionTimeValue::fixed(value.clone()),
            (Shape::Changing, Some(_)) => ExecutionTimeValue::changing(this.clone()),
        })
    }

    fn describe_self(&self) -> String {
        self.name.clone()
    }
}
