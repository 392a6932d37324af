mod support;

use std::thread;

use lazyprov_engine::{
    ExecutionTimeValue, ProviderError, ProviderEvaluator, ProviderRef, TaskHandle, TaskOutputProvider, ValueConsumer,
};
use lazyprov_util::EvaluationSettings;
use support::Probe;

#[test]
fn providers_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProviderRef<String>>();
    assert_send_sync::<ExecutionTimeValue<Vec<u8>>>();
    assert_send_sync::<ProviderError>();
}

#[test]
fn shared_graph_is_readable_from_many_threads() {
    let base = ProviderRef::fixed(20_u32);
    let combined = base
        .zip(&ProviderRef::fixed(22_u32), |a, b| a + b)
        .or_else_value(0)
        .map(|value| value.to_string());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let combined = combined.clone();
            thread::spawn(move || (combined.get().ok(), combined.describe()))
        })
        .collect();

    for handle in handles {
        let (value, description) = handle.join().unwrap();
        assert_eq!(value.as_deref(), Some("42"));
        assert_eq!(description, "map(or(zip(fixed(u32, 20), fixed(u32, 22)), fixed(u32, 0)))");
    }
}

#[test]
fn zip_with_missing_left_never_forces_right() {
    let (left, _) = Probe::<u8>::missing("left");
    let (right, right_counts) = Probe::present("right", 1_u8);
    let zipped = left.zip(&right, |a, b| a + b);

    assert!(!zipped.is_present().unwrap());
    assert!(zipped.get_or_none().unwrap().is_none());
    assert!(zipped.fold_execution_time().unwrap().is_missing());
    assert_eq!(right_counts.presence(), 0);
    assert_eq!(right_counts.forced(), 0);
}

#[test]
fn map_presence_does_not_force_the_source() {
    let (source, counts) = Probe::present("source", 3_u8);
    let doubled = source.map(|value| value * 2);

    assert!(doubled.is_present().unwrap());
    assert_eq!(counts.presence(), 1);
    assert_eq!(counts.value(), 0);
}

#[test]
fn flat_map_over_fixed_source_folds_the_selected_provider() {
    let (inner, inner_counts) = Probe::changing("inner", 5_u8);
    let selected = ProviderRef::fixed(true).flat_map(move |_| inner.clone());

    let folded = selected.fold_execution_time().unwrap();

    assert_eq!(inner_counts.fold(), 1);
    assert_eq!(folded.changing_value().unwrap().get().unwrap(), 5);
}

#[test]
fn folding_a_chain_of_fixed_values_collapses_it() {
    let chain = ProviderRef::<String>::missing()
        .or_else_value("1".to_string())
        .map(|text| text.parse::<u32>().unwrap_or_default())
        .zip(&ProviderRef::fixed(2_u32), |a, b| a * b);

    assert_eq!(chain.fold_execution_time().unwrap(), ExecutionTimeValue::fixed(2));
}

#[test]
fn task_output_flows_through_combinators() {
    let task = TaskHandle::new(":lib:jar");
    let output = ProviderRef::new(TaskOutputProvider::new(task.clone(), || Ok("lib.jar".to_string())));
    let path = output.map(|name| format!("build/libs/{name}")).or_else_value("none".to_string());

    let strict = EvaluationSettings::default();
    let evaluator = ProviderEvaluator::new(&strict);

    let summary = evaluator.producer_summary(&path);
    assert!(summary.known);
    assert_eq!(summary.tasks, [task.path().clone()]);

    let error = evaluator.resolve(&path).unwrap_err();
    assert!(matches!(error, ProviderError::UnsafeRead { .. }), "{error}");
    assert!(path.presence(ValueConsumer::DisallowUnsafeRead).unwrap(), "declared outputs are present before they run");
    assert_eq!(path.get().unwrap(), "build/libs/lib.jar");

    task.mark_completed();
    assert_eq!(evaluator.resolve(&path).unwrap(), "build/libs/lib.jar");
    assert!(evaluator.simplify(&path).unwrap().is_changing());
}
