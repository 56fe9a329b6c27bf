//! Scenario handle and run builder.
use crate::config::RunConfig;
use crate::report::RunReport;
use crate::runner::run_scenario;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

/// A runnable load-test scenario.
///
/// Wraps an iteration closure and a [`RunConfig`]; awaiting the scenario
/// executes the run on a pool of virtual users and resolves to the
/// aggregate [`RunReport`].
///
/// # Example
/// ```no_run
/// use stampede::Scenario;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let report = Scenario::new("noop", || async {})
///         .vus(10)
///         .duration(Duration::from_secs(30))
///         .await;
///     println!("{report}");
/// }
/// ```
#[pin_project::pin_project]
pub struct Scenario<T> {
    func: T,
    runner_fut: Option<Pin<Box<dyn Future<Output = RunReport> + Send>>>,
    config: RunConfig,
}

impl<T> Scenario<T> {
    pub fn new(name: &str, func: T) -> Self {
        Self {
            func,
            runner_fut: None,
            config: RunConfig::new(name),
        }
    }

    /// Sets the number of concurrent virtual users.
    pub fn vus(mut self, vus: usize) -> Self {
        self.config.vus = vus;
        self
    }

    /// Runs the scenario for the given wall-clock duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = Some(duration);
        self
    }

    /// Caps each virtual user at `iterations` iterations. Useful for
    /// deterministic runs; whichever of the duration or the cap is reached
    /// first stops the worker.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.config.iterations = Some(iterations);
        self
    }

    /// Sets the p95 request-latency bound the run must stay under.
    pub fn latency_threshold(mut self, bound: Duration) -> Self {
        self.config.thresholds.latency_p95 = bound;
        self
    }

    /// Sets the transport failure-rate bound the run must stay under.
    pub fn failure_rate_threshold(mut self, rate: f64) -> Self {
        self.config.thresholds.failure_rate = rate;
        self
    }

    /// Replaces the whole run configuration, e.g. one built with
    /// [`RunConfig::from_env`].
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}

impl<T, F> Future for Scenario<T>
where
    T: Fn() -> F + Send + 'static + Clone + Sync,
    F: Future<Output = ()> + Send,
{
    type Output = RunReport;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.runner_fut.is_none() {
            let func = self.func.clone();
            let config = self.config.clone();
            self.runner_fut = Some(Box::pin(async move { run_scenario(func, config).await }));
        }

        if let Some(runner) = &mut self.runner_fut {
            runner.as_mut().poll(cx)
        } else {
            unreachable!()
        }
    }
}
