use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::PoolError;

/// A unit of work. Returns `false` when it was skipped because the caller
/// stopped waiting before it started.
type Job = Box<dyn FnOnce() -> bool + Send + 'static>;

/// A dedicated worker thread fed through a bounded queue.
struct Worker {
    job_tx: mpsc::Sender<Job>,
}

impl Worker {
    fn spawn(index: usize, queue_depth: usize) -> Result<Self, PoolError> {
        let (job_tx, mut job_rx) = mpsc::channel::<Job>(queue_depth);

        std::thread::Builder::new()
            .name(format!("store-worker-{index}"))
            .spawn(move || {
                tracing::debug!(worker = index, "Store worker started");

                while let Some(job) = job_rx.blocking_recv() {
                    if !job() {
                        tracing::debug!(worker = index, "Skipped job canceled before start");
                    }
                }

                tracing::debug!(worker = index, "Store worker shutting down");
            })
            .map_err(|e| PoolError::Spawn(e.to_string()))?;

        Ok(Self { job_tx })
    }

    fn has_capacity(&self) -> bool {
        self.job_tx.capacity() > 0
    }
}

/// A fixed set of worker threads with round-robin dispatch and
/// backpressure.
///
/// Dropping the pool closes every queue; workers finish queued jobs and exit.
pub struct WorkerPool {
    workers: Vec<Worker>,
    next_worker: AtomicUsize,
}

impl WorkerPool {
    /// Spawns `worker_count` threads, each accepting up to `queue_depth`
    /// pending jobs.
    pub fn new(worker_count: usize, queue_depth: usize) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::InvalidConfig(
                "worker_count must be greater than 0".to_string(),
            ));
        }
        if queue_depth == 0 {
            return Err(PoolError::InvalidConfig(
                "queue_depth must be greater than 0".to_string(),
            ));
        }

        let workers = (0..worker_count)
            .map(|index| Worker::spawn(index, queue_depth))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(worker_count, queue_depth, "Worker pool initialized");

        Ok(Self {
            workers,
            next_worker: AtomicUsize::new(0),
        })
    }

    /// Runs `job` on a worker thread and waits for its result.
    ///
    /// Returns `Overloaded` when every queue is full. If the returned future
    /// is dropped before a worker picks the job up, the job is skipped.
    pub async fn submit<F, R>(&self, job: F) -> Result<R, PoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let worker = self.pick_worker().ok_or(PoolError::Overloaded)?;

        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            if result_tx.is_closed() {
                return false;
            }
            // Receiver may go away mid-run; the result is then discarded.
            let _ = result_tx.send(job());
            true
        });

        worker
            .job_tx
            .send(job)
            .await
            .map_err(|_| PoolError::ChannelClosed)?;

        result_rx.await.map_err(|_| PoolError::Canceled)
    }

    /// Round-robin selection among workers that have queue capacity.
    fn pick_worker(&self) -> Option<&Worker> {
        let count = self.workers.len();
        let start = self.next_worker.fetch_add(1, Ordering::Relaxed);
        (0..count)
            .map(|offset| &self.workers[(start + offset) % count])
            .find(|worker| worker.has_capacity())
    }

    /// Get pool statistics (passive - no I/O).
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            worker_count: self.workers.len(),
            workers_with_capacity: self.workers.iter().filter(|w| w.has_capacity()).count(),
        }
    }
}

/// Pool statistics (passive data).
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub worker_count: usize,
    pub workers_with_capacity: usize,
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize},
        Arc, Barrier,
    };
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_submit_returns_job_result() {
        let pool = WorkerPool::new(2, 4).unwrap();

        let result = pool.submit(|| 21 * 2).await.unwrap();

        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_jobs_run_off_the_calling_thread() {
        let pool = WorkerPool::new(1, 4).unwrap();
        let caller = std::thread::current().id();

        let worker = pool.submit(|| std::thread::current().id()).await.unwrap();

        assert_ne!(caller, worker);
    }

    #[tokio::test]
    async fn test_many_jobs_complete() {
        let pool = WorkerPool::new(3, 16).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..20 {
            let counter = Arc::clone(&counter);
            pool.submit(move || counter.fetch_add(1, Ordering::SeqCst))
                .await
                .unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        assert!(matches!(
            WorkerPool::new(0, 4),
            Err(PoolError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorkerPool::new(1, 0),
            Err(PoolError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_dropped_submission_is_skipped() {
        let pool = Arc::new(WorkerPool::new(1, 4).unwrap());
        let gate = Arc::new(Barrier::new(2));
        let ran = Arc::new(AtomicBool::new(false));

        // Occupy the only worker until the gate opens.
        let blocker = {
            let pool = Arc::clone(&pool);
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { pool.submit(move || gate.wait()).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Queue a job, then stop waiting for it before it can start.
        let queued = {
            let ran = Arc::clone(&ran);
            pool.submit(move || ran.store(true, Ordering::SeqCst))
        };
        let timed_out = tokio::time::timeout(Duration::from_millis(50), queued).await;
        assert!(timed_out.is_err());

        gate.wait();
        blocker.await.unwrap().unwrap();

        // A follow-up job proves the queue drained past the canceled one.
        pool.submit(|| ()).await.unwrap();
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_stats_report_workers() {
        let pool = WorkerPool::new(3, 2).unwrap();

        let stats = pool.stats();

        assert_eq!(stats.worker_count, 3);
        assert_eq!(stats.workers_with_capacity, 3);
    }
}
