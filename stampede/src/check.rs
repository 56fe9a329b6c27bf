//! Named, non-fatal response assertions.
use crate::transaction::WORKER_HOOK;
use tracing::{error, warn};

/// Records a named boolean assertion against the current run.
///
/// Checks are observational: a failing check is tallied and logged but never
/// aborts the iteration or the run. The outcome is returned unchanged so a
/// check can gate follow-up work:
///
/// ```rust
/// use stampede::check;
///
/// let created = check("POST /books status 201", true);
/// if created {
///     // fetch / update / delete the new record
/// }
/// ```
///
/// Per-name tallies are aggregated across all virtual users and surfaced in
/// the [`RunReport`](crate::RunReport). Calling `check` outside of a running
/// scenario logs an error and records nothing.
pub fn check(name: &'static str, passed: bool) -> bool {
    if let Ok(hook) = WORKER_HOOK.try_with(|v| v.clone()) {
        let mut checks = hook.lock_checks();
        let counts = checks.entry(name).or_default();
        if passed {
            counts.passes += 1;
        } else {
            counts.failures += 1;
            warn!("Check failed: {name}");
        }

        #[cfg(feature = "metrics")]
        {
            let outcome = if passed { "pass" } else { "fail" };
            metrics::counter!("stampede.checks", "check" => name, "outcome" => outcome)
                .increment(1);
        }
    } else {
        error!("Check '{name}' recorded outside of a scenario run.");
    }
    passed
}
