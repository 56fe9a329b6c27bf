//! Virtual-user worker pool.
//!
//! Each virtual user is a tokio task that runs the iteration future to
//! completion, then re-checks the stop condition. All workers share one
//! [`WorkerHook`] so measurements aggregate across the whole run.
use crate::config::RunConfig;
use crate::report::{CheckReport, RunReport};
use crate::transaction::{WorkerHook, WORKER_HOOK};
use std::future::Future;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

#[instrument(name = "scenario", skip_all, fields(name = config.name))]
pub(crate) async fn run_scenario<T, F>(scenario: T, config: RunConfig) -> RunReport
where
    T: Fn() -> F + Send + Sync + 'static + Clone,
    F: Future<Output = ()> + Send,
{
    info!("Running {} with config {:?}", config.name, &config);

    let hook = WorkerHook::new();
    let start = Instant::now();
    let deadline = config.duration.map(|duration| start + duration);
    let iteration_cap = config.iterations;

    let mut workers = Vec::with_capacity(config.vus);
    for vu in 0..config.vus {
        let scenario = scenario.clone();
        let hook = hook.clone();
        workers.push(tokio::spawn(WORKER_HOOK.scope(hook, async move {
            let mut iterations = 0u64;
            loop {
                scenario().await;
                iterations += 1;

                match (iteration_cap, deadline) {
                    (Some(cap), _) if iterations >= cap => break,
                    (_, Some(deadline)) if Instant::now() >= deadline => break,
                    // Nothing to wait for: a config without any stop
                    // condition runs a single iteration per VU.
                    (None, None) => break,
                    _ => {}
                }
            }
            debug!("Virtual user {vu} finished after {iterations} iterations");
            iterations
        })));
    }

    let mut iterations = 0u64;
    for worker in workers {
        match worker.await {
            Ok(count) => iterations += count,
            Err(err) => error!("Virtual user task failed: {err}"),
        }
    }
    let elapsed = start.elapsed();

    let requests = hook.requests.swap(0, Ordering::Relaxed);
    let failures = hook.failures.swap(0, Ordering::Relaxed);
    let mut latencies = Vec::new();
    hook.latency
        .clear_with(|durs| latencies.extend_from_slice(durs));
    let checks: Vec<CheckReport> = hook
        .lock_checks()
        .iter()
        .map(|(name, counts)| CheckReport {
            name,
            passes: counts.passes,
            failures: counts.failures,
        })
        .collect();

    let report = RunReport::new(
        config.name.clone(),
        config.vus,
        elapsed,
        iterations,
        requests,
        failures,
        checks,
        latencies,
        &config.thresholds,
    );

    info!("Scenario complete");
    report
}
