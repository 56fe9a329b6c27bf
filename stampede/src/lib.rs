#![doc = include_str!("../README.md")]

pub mod check;
pub mod config;
pub mod report;
pub mod scenario;
pub mod transaction;

pub(crate) mod runner;

pub use check::check;
pub use config::{ConfigError, RunConfig, Thresholds};
pub use report::{CheckReport, RunReport};
pub use scenario::Scenario;
pub use transaction::transaction;

pub mod prelude {
    pub use crate::check::check;
    pub use crate::config::{RunConfig, Thresholds};
    pub use crate::report::{CheckReport, RunReport};
    pub use crate::scenario::Scenario;
    pub use crate::transaction::transaction;
}
