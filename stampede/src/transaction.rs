//! Per-request measurement.
//!
//! Every HTTP call a scenario makes should go through [`transaction`], which
//! times the wrapped future and feeds the shared run counters. The counters
//! live in a task-local hook scoped around each virtual-user task by the
//! runner; all virtual users of a run share the same underlying atomics.
use metrics_util::AtomicBucket;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::error;

/// Times a `Result`-returning future and records it as one request.
///
/// Latency is always recorded; an `Err` additionally counts as a failed
/// request (transport failure). The result is passed through untouched so
/// callers can keep inspecting status codes or bodies.
///
/// Outside of a running scenario the future is simply awaited.
pub async fn transaction<T, R, E>(func: T) -> T::Output
where
    T: Future<Output = Result<R, E>>,
{
    if let Ok(hook) = WORKER_HOOK.try_with(|v| v.clone()) {
        let start = Instant::now();
        let res = func.await;
        let elapsed = start.elapsed();

        hook.latency.push(elapsed);
        hook.requests.fetch_add(1, Ordering::Relaxed);
        if res.is_err() {
            hook.failures.fetch_add(1, Ordering::Relaxed);
        }

        #[cfg(feature = "metrics")]
        {
            metrics::histogram!("stampede.request_duration")
                .record(elapsed.as_secs_f64());
            if res.is_ok() {
                metrics::counter!("stampede.requests", "outcome" => "ok").increment(1);
            } else {
                metrics::counter!("stampede.requests", "outcome" => "error").increment(1);
            }
        }

        res
    } else {
        error!("No worker hook available; request will not be measured.");
        func.await
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CheckCounts {
    pub passes: u64,
    pub failures: u64,
}

/// Aggregate counters shared by every virtual user of a run.
#[derive(Clone)]
pub(crate) struct WorkerHook {
    pub requests: Arc<AtomicU64>,
    pub failures: Arc<AtomicU64>,
    pub latency: Arc<AtomicBucket<Duration>>,
    pub checks: Arc<Mutex<BTreeMap<&'static str, CheckCounts>>>,
}

impl WorkerHook {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(AtomicU64::new(0)),
            failures: Arc::new(AtomicU64::new(0)),
            latency: Arc::new(AtomicBucket::new()),
            checks: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub fn lock_checks(&self) -> MutexGuard<'_, BTreeMap<&'static str, CheckCounts>> {
        match self.checks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

tokio::task_local! {
    pub(crate) static WORKER_HOOK: WorkerHook;
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ok() -> Result<u32, ()> {
        Ok(7)
    }

    async fn err() -> Result<u32, ()> {
        Err(())
    }

    #[tokio::test]
    async fn records_success_and_failure() {
        let hook = WorkerHook::new();
        WORKER_HOOK
            .scope(hook.clone(), async {
                assert_eq!(transaction(ok()).await, Ok(7));
                assert_eq!(transaction(err()).await, Err(()));
                assert_eq!(transaction(ok()).await, Ok(7));
            })
            .await;

        assert_eq!(hook.requests.load(Ordering::Relaxed), 3);
        assert_eq!(hook.failures.load(Ordering::Relaxed), 1);

        let mut latencies = vec![];
        hook.latency.clear_with(|durs| latencies.extend_from_slice(durs));
        assert_eq!(latencies.len(), 3);
    }

    #[tokio::test]
    async fn passes_through_without_hook() {
        assert_eq!(transaction(ok()).await, Ok(7));
    }
}
