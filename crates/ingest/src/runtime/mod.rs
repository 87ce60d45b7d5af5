use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::IngestError;
use crate::source::{FilenameSource, SourceEntry};
use crate::traits::Executor;
use crate::types::{RunStats, StatsCounter};

pub mod flow_control;
pub mod tracker;

pub use flow_control::FlowControlConfig;
pub use tracker::PendingTracker;

pub type DynExecutor = Arc<dyn Executor + Send + Sync>;

type SharedQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Fans file names out to a fixed pool of workers and waits for all of them.
pub struct Dispatcher {
    pub executor: DynExecutor,
    pub flow_control: FlowControlConfig,
}

impl Dispatcher {
    pub fn new(executor: DynExecutor, flow_control: FlowControlConfig) -> Self {
        Self {
            executor,
            flow_control,
        }
    }

    /// Submits every name from `source` and returns once all submitted names are processed.
    ///
    /// Per-file failures are logged and counted. A failure to read `source` stops
    /// submission; work already submitted still completes before the error is returned.
    pub async fn run(&self, source: FilenameSource) -> Result<RunStats, IngestError> {
        let workers = self.flow_control.effective_workers();
        let (intake_tx, intake_rx) = mpsc::channel::<String>(self.flow_control.effective_capacity());
        let queue: SharedQueue = Arc::new(Mutex::new(intake_rx));
        let tracker = Arc::new(PendingTracker::new());
        let stats = Arc::new(StatsCounter::default());

        let mut pool = JoinSet::new();
        for worker_id in 0..workers {
            pool.spawn(worker_loop(
                worker_id,
                Arc::clone(&queue),
                Arc::clone(&self.executor),
                Arc::clone(&tracker),
                Arc::clone(&stats),
            ));
        }
        debug!("dispatcher started {} workers", workers);

        let enumerated = {
            let tx = &intake_tx;
            let tracker = &tracker;
            let stats = &stats;
            source
                .for_each(move |entry| async move {
                    stats.submitted();
                    let name = match entry {
                        SourceEntry::Name(name) => name,
                        SourceEntry::Unreadable(lossy) => {
                            error!(file = %lossy, "error: {} - file name is not valid UTF-8", lossy);
                            stats.failed();
                            return Ok(());
                        }
                    };
                    tracker.register();
                    tx.send(name).await.map_err(|_| {
                        tracker.mark_done();
                        IngestError::Execution("worker pool closed".to_string())
                    })
                })
                .await
        };
        drop(intake_tx);

        tracker.wait_idle().await;

        let mut joined = Ok(());
        while let Some(res) = pool.join_next().await {
            if let Err(e) = res {
                joined = Err(IngestError::Join(e.to_string()));
            }
        }

        let submitted = enumerated?;
        joined?;
        debug!("dispatcher finished {} file names", submitted);
        Ok(stats.snapshot())
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: SharedQueue,
    executor: DynExecutor,
    tracker: Arc<PendingTracker>,
    stats: Arc<StatsCounter>,
) {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(name) = next else {
            break;
        };

        let job = Arc::clone(&executor);
        let job_name = name.clone();
        match tokio::task::spawn_blocking(move || job.execute(&job_name)).await {
            Ok(Ok(records)) => stats.succeeded(records),
            Ok(Err(err)) => {
                error!(file = %name, "error: {} - {}", name, err);
                stats.failed();
            }
            Err(err) => {
                error!(file = %name, "worker {} aborted: {}", worker_id, err);
                stats.failed();
            }
        }
        tracker.mark_done();
    }
}
