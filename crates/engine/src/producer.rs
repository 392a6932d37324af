//! Which build actions produce a provider's value.
//!
//! Producers are derived from provider structure alone and never realise values, so the
//! dependency graph builder can ask for them at any time.

use indexmap::IndexMap;
use lazyprov_types::TaskPath;

use crate::task::TaskHandle;

/// Accumulated producers of a value.
#[derive(Debug, Clone, Default)]
pub enum ValueProducer {
    /// Nothing needs to run; the value is available as-is.
    #[default]
    NoProducer,
    /// The producers cannot be determined without realising a value.
    Unknown,
    /// A single build action.
    Task(TaskHandle),
    /// Union of two producers.
    Plus(Box<ValueProducer>, Box<ValueProducer>),
}

impl ValueProducer {
    pub fn none() -> Self {
        Self::NoProducer
    }

    pub fn unknown() -> Self {
        Self::Unknown
    }

    pub fn task(task: TaskHandle) -> Self {
        Self::Task(task)
    }

    /// Union of `self` and `other`. `NoProducer` is the identity on either side.
    pub fn plus(self, other: ValueProducer) -> Self {
        match (self, other) {
            (Self::NoProducer, other) => other,
            (this, Self::NoProducer) => this,
            (this, other) => Self::Plus(Box::new(this), Box::new(other)),
        }
    }

    /// `false` when any part of the union is [`ValueProducer::Unknown`].
    pub fn is_known(&self) -> bool {
        match self {
            Self::Unknown => false,
            Self::Plus(left, right) => left.is_known() && right.is_known(),
            Self::NoProducer | Self::Task(_) => true,
        }
    }

    pub fn is_produced_by_task(&self) -> bool {
        match self {
            Self::Task(_) => true,
            Self::Plus(left, right) => left.is_produced_by_task() || right.is_produced_by_task(),
            Self::NoProducer | Self::Unknown => false,
        }
    }

    /// Calls `visitor` for every task in the union, left to right, duplicates included.
    pub fn visit_producer_tasks<F: FnMut(&TaskHandle)>(&self, visitor: &mut F) {
        match self {
            Self::Task(task) => visitor(task),
            Self::Plus(left, right) => {
                left.visit_producer_tasks(visitor);
                right.visit_producer_tasks(visitor);
            }
            Self::NoProducer | Self::Unknown => {}
        }
    }

    /// Distinct producing tasks in first-seen order.
    pub fn tasks(&self) -> Vec<TaskHandle> {
        let mut seen: IndexMap<TaskPath, TaskHandle> = IndexMap::new();
        self.visit_producer_tasks(&mut |task: &TaskHandle| {
            seen.entry(task.path().clone()).or_insert_with(|| task.clone());
        });
        seen.into_values().collect()
    }
}
