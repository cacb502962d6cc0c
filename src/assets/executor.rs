use futures::task::{FutureObj, Spawn, SpawnError};

/// Runs each spawned task to completion on its own named worker thread.
///
/// Load tasks spend nearly all their time waiting on loader I/O, so a thread per
/// in-flight placement is enough; the scene thread never blocks on them.
#[derive(Debug, Clone)]
pub struct WorkerSpawner {
    name: String,
}

impl WorkerSpawner {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for WorkerSpawner {
    fn default() -> Self {
        Self::new("perch-worker")
    }
}

impl Spawn for WorkerSpawner {
    fn spawn_obj(&self, future: FutureObj<'static, ()>) -> Result<(), SpawnError> {
        std::thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || pollster::block_on(future))
            .map(|_| ())
            .map_err(|e| {
                log::warn!("Failed to start worker thread: {}", e);
                SpawnError::shutdown()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::SpawnExt;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_task_runs_on_worker_thread() {
        let (tx, rx) = mpsc::channel();
        WorkerSpawner::new("perch-test-worker")
            .spawn(async move {
                let name = std::thread::current().name().map(str::to_owned);
                tx.send(name).unwrap();
            })
            .unwrap();

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("perch-test-worker"));
    }
}
