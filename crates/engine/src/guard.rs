//! Per-thread reentrancy guards keyed by provider identity.
//!
//! Provider graphs own their operands acyclically, but descriptions and evaluations can still
//! loop back through weak back-references or leaf closures. Each guard tracks the providers
//! currently being rendered (or evaluated) on this thread; entries are removed when the scope
//! ends, including on unwind, so separate top-level calls never observe each other.

use std::{cell::RefCell, collections::HashSet, thread::LocalKey};

use tracing::{trace, warn};

use crate::error::ProviderError;

/// Rendered in place of a provider whose description is already in progress.
pub const CIRCULAR_REFERENCE: &str = "<circular reference>";

type ActiveSet = RefCell<HashSet<usize>>;

thread_local! {
    static RENDERING: ActiveSet = RefCell::new(HashSet::new());
    static EVALUATING: ActiveSet = RefCell::new(HashSet::new());
}

struct Entered {
    active: &'static LocalKey<ActiveSet>,
    identity: usize,
}

impl Entered {
    fn try_enter(active: &'static LocalKey<ActiveSet>, identity: usize) -> Option<Self> {
        let inserted = active.with(|set| set.borrow_mut().insert(identity));
        inserted.then(|| Self { active, identity })
    }
}

impl Drop for Entered {
    fn drop(&mut self) {
        let _ = self.active.try_with(|set| set.borrow_mut().remove(&self.identity));
    }
}

/// Runs `render` unless `identity` is already being rendered on this thread, in which case the
/// [`CIRCULAR_REFERENCE`] placeholder is returned instead.
pub(crate) fn render_guarded(identity: usize, render: impl FnOnce() -> String) -> String {
    match Entered::try_enter(&RENDERING, identity) {
        Some(_entered) => render(),
        None => {
            trace!(identity, "description re-entered; rendering placeholder");
            CIRCULAR_REFERENCE.to_string()
        }
    }
}

/// Runs `evaluate` unless `identity` is already being evaluated on this thread.
pub(crate) fn evaluation_guarded<R>(
    identity: usize,
    describe: impl FnOnce() -> String,
    evaluate: impl FnOnce() -> Result<R, ProviderError>,
) -> Result<R, ProviderError> {
    let Some(_entered) = Entered::try_enter(&EVALUATING, identity) else {
        let provider = describe();
        warn!(provider = %provider, "circular provider evaluation");
        return Err(ProviderError::CircularEvaluation { provider });
    };
    evaluate()
}
