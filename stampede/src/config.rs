//! Run configuration.
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_VUS: usize = 10;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);

/// Pass/fail criteria evaluated over the whole run once it completes.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// The 95th-percentile request latency must stay below this bound.
    pub latency_p95: Duration,
    /// The transport failure rate must stay below this bound.
    pub failure_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            latency_p95: Duration::from_millis(500),
            failure_rate: 0.01,
        }
    }
}

/// Configuration for a single scenario run. Immutable once the run starts.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub name: String,
    /// Number of concurrent virtual users.
    pub vus: usize,
    /// Wall-clock run length. Workers stop looping once it elapses; an
    /// in-flight iteration always runs to completion.
    pub duration: Option<Duration>,
    /// Per-VU iteration cap. Whichever of `duration`/`iterations` is hit
    /// first stops the worker; every worker completes at least one iteration.
    pub iterations: Option<u64>,
    pub thresholds: Thresholds,
}

impl RunConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vus: DEFAULT_VUS,
            duration: Some(DEFAULT_DURATION),
            iterations: None,
            thresholds: Thresholds::default(),
        }
    }

    /// Builds a config from the environment: `VUS` (virtual-user count) and
    /// `DURATION` (humantime-formatted, e.g. "30s"). Unset variables keep
    /// their defaults; malformed values are errors.
    pub fn from_env(name: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new(name);

        if let Some(vus) = read_var("VUS")? {
            config.vus = vus
                .parse()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::InvalidVus(vus))?;
        }

        if let Some(duration) = read_var("DURATION")? {
            config.duration = Some(humantime::parse_duration(&duration)?);
        }

        Ok(config)
    }
}

fn read_var(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("VUS must be a positive integer, got '{0}'")]
    InvalidVus(String),
    #[error("DURATION is not a valid duration: {0}")]
    InvalidDuration(#[from] humantime::DurationError),
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}
