use std::{collections::HashMap, future::Future};

use tokio::task::JoinHandle;
use tracing::debug;

/// Keyed background tasks, at most one per key. Spawning under a key that is
/// still running aborts the earlier task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn<F>(&mut self, key: impl Into<String>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let key = key.into();
        if let Some(previous) = self.tasks.insert(key.clone(), tokio::spawn(future)) {
            debug!("Superseding in-flight task '{}'", key);
            previous.abort();
        }
    }

    /// Starts the task built by `make` only when nothing is running under
    /// `key`. Returns whether it was started; `make` is not called otherwise.
    pub fn spawn_if_idle<F, Fut>(&mut self, key: impl Into<String>, make: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let key = key.into();
        if self.is_running(&key) {
            debug!("Ignoring '{}' while the previous one is in flight", key);
            return false;
        }
        self.spawn(key, make());
        true
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}
