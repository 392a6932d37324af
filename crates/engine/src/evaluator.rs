//! Settings-aware entry point for collaborators that query provider chains.
//!
//! The dependency graph builder, the configuration-cache pass and error reporting all go through
//! the same provider contract; [`ProviderEvaluator`] bundles those queries with the injected
//! [`EvaluationSettings`] so each caller picks up the configured consumer mode and report limits.

use lazyprov_types::{TaskPath, ValueConsumer};
use lazyprov_util::EvaluationSettings;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{MissingValueError, ProviderError},
    execution_time::ExecutionTimeValue,
    provider::{ProviderRef, ProviderValue},
    value::Value,
};

/// Producers of a provider in a form the dependency graph builder can record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProducerSummary {
    /// `false` when some producer can only be known after realising a value.
    pub known: bool,
    /// Distinct producing tasks in first-seen order.
    pub tasks: Vec<TaskPath>,
}

/// Runs provider queries under a fixed set of evaluation settings.
#[derive(Debug, Clone, Copy)]
pub struct ProviderEvaluator<'settings> {
    settings: &'settings EvaluationSettings,
}

impl<'settings> ProviderEvaluator<'settings> {
    pub fn new(settings: &'settings EvaluationSettings) -> Self {
        Self { settings }
    }

    pub fn consumer(&self) -> ValueConsumer {
        self.settings.consumer
    }

    pub fn is_present<T: ProviderValue>(&self, provider: &ProviderRef<T>) -> Result<bool, ProviderError> {
        provider.presence(self.consumer())
    }

    /// The provider's value. Absence is an error listing at most `max_reported_paths` contributing
    /// providers.
    pub fn resolve<T: ProviderValue>(&self, provider: &ProviderRef<T>) -> Result<T, ProviderError> {
        match provider.value(self.consumer())? {
            Value::Present(value) => Ok(value),
            Value::Missing(diagnostic) => {
                debug!(
                    provider = %provider,
                    paths = diagnostic.paths().len(),
                    "required provider has no value"
                );
                Err(MissingValueError::new(provider.describe(), diagnostic)
                    .with_path_limit(self.settings.max_reported_paths)
                    .into())
            }
        }
    }

    pub fn resolve_optional<T: ProviderValue>(&self, provider: &ProviderRef<T>) -> Result<Option<T>, ProviderError> {
        Ok(provider.value(self.consumer())?.into_option())
    }

    /// Structural producer query; never realises values.
    pub fn producer_summary<T: ProviderValue>(&self, provider: &ProviderRef<T>) -> ProducerSummary {
        let producer = provider.producer();
        ProducerSummary {
            known: producer.is_known(),
            tasks: producer.tasks().into_iter().map(|task| task.path().clone()).collect(),
        }
    }

    /// Folds the provider to its execution-time form.
    pub fn simplify<T: ProviderValue>(&self, provider: &ProviderRef<T>) -> Result<ExecutionTimeValue<T>, ProviderError> {
        let folded = provider.fold_execution_time()?;
        debug!(provider = %provider, outcome = folded.kind(), "folded provider for execution time");
        Ok(folded)
    }
}
