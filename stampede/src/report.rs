//! End-of-run aggregation and threshold evaluation.
use crate::config::Thresholds;
use pdatastructs::tdigest::{TDigest, K1};
use std::fmt;
use std::time::Duration;
use tracing::error;

const TDIGEST_BACKLOG_SIZE: usize = 100;

/// Pass/fail tally for one named check, aggregated across all virtual users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: &'static str,
    pub passes: u64,
    pub failures: u64,
}

/// Aggregate results of a scenario run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub name: String,
    pub vus: usize,
    pub elapsed: Duration,
    /// Iterations completed, summed over all virtual users.
    pub iterations: u64,
    /// Requests issued through [`transaction`](crate::transaction).
    pub requests: u64,
    /// Requests that failed at the transport level.
    pub failures: u64,
    /// Per-check tallies, ordered by check name.
    pub checks: Vec<CheckReport>,
    latency: TDigest<K1>,
    passed: bool,
}

impl RunReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        vus: usize,
        elapsed: Duration,
        iterations: u64,
        requests: u64,
        failures: u64,
        checks: Vec<CheckReport>,
        latencies: Vec<Duration>,
        thresholds: &Thresholds,
    ) -> Self {
        let mut latency = default_tdigest();
        for dur in &latencies {
            latency.insert(dur.as_secs_f64());
        }

        let mut report = Self {
            name,
            vus,
            elapsed,
            iterations,
            requests,
            failures,
            checks,
            latency,
            passed: false,
        };
        report.passed = report.latency(0.95) < thresholds.latency_p95
            && report.failure_rate() < thresholds.failure_rate;
        report
    }

    /// Request latency at the given quantile.
    pub fn latency(&self, quantile: f64) -> Duration {
        let secs = self.latency.quantile(quantile);

        // The TDigest returns NaN when empty; report zero instead.
        let secs = if secs.is_finite() {
            secs
        } else {
            if self.requests > 0 {
                error!("Non-finite latency quantile for a non-empty run.");
            }
            0.
        };

        Duration::from_secs_f64(secs)
    }

    /// Fraction of requests that failed at the transport level.
    pub fn failure_rate(&self) -> f64 {
        if self.requests == 0 {
            0.
        } else {
            self.failures as f64 / self.requests as f64
        }
    }

    /// Whether the run stayed within its thresholds.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Looks up one check's tally by name.
    pub fn check(&self, name: &str) -> Option<&CheckReport> {
        self.checks.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} ({} VUs, {:.1?})",
            self.name,
            if self.passed { "PASSED" } else { "FAILED" },
            self.vus,
            self.elapsed,
        )?;
        writeln!(
            f,
            "  iterations={} requests={} failure_rate={:.2}%",
            self.iterations,
            self.requests,
            self.failure_rate() * 100.,
        )?;
        writeln!(
            f,
            "  latency: p50={:.2?} p95={:.2?} p99={:.2?}",
            self.latency(0.50),
            self.latency(0.95),
            self.latency(0.99),
        )?;
        writeln!(f, "  checks:")?;
        for check in &self.checks {
            writeln!(
                f,
                "    {}: {} passed, {} failed",
                check.name, check.passes, check.failures
            )?;
        }
        Ok(())
    }
}

fn default_tdigest() -> TDigest<K1> {
    TDigest::new(K1::new(10.), TDIGEST_BACKLOG_SIZE)
}
