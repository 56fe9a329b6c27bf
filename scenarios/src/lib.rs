//! Load-test scenarios: a Books CRUD lifecycle and a read-only Cat Facts
//! sequence. The binaries in `src/bin/` wire these iterations into the
//! stampede harness; the iteration bodies live here so tests can drive them
//! against in-process mock servers.
use std::env;
use std::time::Duration;

pub mod books;
pub mod cat_facts;

/// Pause between iterations, shared by both scenarios.
pub const ITERATION_PAUSE: Duration = Duration::from_secs(1);

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const CAT_FACTS_URL: &str = "https://catfact.ninja";

/// Base URL for the Books API, from `API_URL` if set.
pub fn api_url() -> String {
    env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
