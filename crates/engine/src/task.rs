//! Handles on the build actions that produce provider values.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use lazyprov_types::TaskPath;

/// Shared handle on a build action.
///
/// The scheduler that runs the action lives outside this crate; it flips the completion flag via
/// [`TaskHandle::mark_completed`]. Task-output providers consult the flag to decide whether a
/// read is safe. Handles compare and hash by path.
#[derive(Clone)]
pub struct TaskHandle {
    inner: Arc<TaskState>,
}

struct TaskState {
    path: TaskPath,
    completed: AtomicBool,
}

impl TaskHandle {
    pub fn new(path: impl Into<TaskPath>) -> Self {
        Self {
            inner: Arc::new(TaskState {
                path: path.into(),
                completed: AtomicBool::new(false),
            }),
        }
    }

    pub fn path(&self) -> &TaskPath {
        &self.inner.path
    }

    pub fn is_completed(&self) -> bool {
        self.inner.completed.load(Ordering::Acquire)
    }

    /// Records that the action has run and its outputs are final.
    pub fn mark_completed(&self) {
        self.inner.completed.store(true, Ordering::Release);
    }
}

impl PartialEq for TaskHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.path == other.inner.path
    }
}

impl Eq for TaskHandle {}

impl Hash for TaskHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.path.hash(state);
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("path", &self.inner.path)
            .field("completed", &self.is_completed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_is_visible_through_clones() {
        let task = TaskHandle::new(":app:jar");
        let observer = task.clone();
        assert!(!observer.is_completed());

        task.mark_completed();

        assert!(observer.is_completed());
    }

    #[test]
    fn handles_compare_by_path() {
        assert_eq!(TaskHandle::new("jar"), TaskHandle::new(":jar"));
        assert_ne!(TaskHandle::new(":a:jar"), TaskHandle::new(":b:jar"));
    }
}
