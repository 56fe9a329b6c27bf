//! Mock Cat Facts API.
use axum::{
    debug_handler,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Default)]
pub struct FactsOptions {
    /// `GET /facts` returns an empty `data` list.
    pub empty_data: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct FactRecord {
    pub id: u64,
    pub fact: String,
    pub length: usize,
}

#[derive(Clone)]
pub struct FactsApi {
    state: FactsState,
}

impl FactsApi {
    pub fn new(options: FactsOptions) -> Self {
        Self {
            state: FactsState {
                facts: Arc::new(seed_facts()),
                cursor: Arc::new(AtomicUsize::new(0)),
                log: Arc::new(Mutex::new(Vec::new())),
                options,
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/facts", get(list_facts))
            .route("/fact", get(random_fact))
            .route("/facts/:id", get(get_fact))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Every request seen so far, as "METHOD /path" lines in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.log.lock().unwrap().clone()
    }

    pub fn fact_ids(&self) -> Vec<u64> {
        self.state.facts.iter().map(|f| f.id).collect()
    }
}

#[derive(Clone)]
struct FactsState {
    facts: Arc<Vec<FactRecord>>,
    cursor: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
    options: FactsOptions,
}

impl FactsState {
    fn record(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<usize>,
}

#[debug_handler]
async fn list_facts(
    State(state): State<FactsState>,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    state.record("GET /facts".to_string());

    let data: Vec<&FactRecord> = if state.options.empty_data {
        vec![]
    } else {
        let limit = params.limit.unwrap_or(10);
        state.facts.iter().take(limit).collect()
    };

    Json(json!({
        "current_page": 1,
        "data": data,
        "per_page": params.limit.unwrap_or(10),
        "total": state.facts.len(),
    }))
}

#[debug_handler]
async fn random_fact(State(state): State<FactsState>) -> Json<FactRecord> {
    state.record("GET /fact".to_string());

    // Rotates through the seed set; random enough for a mock.
    let idx = state.cursor.fetch_add(1, Ordering::Relaxed) % state.facts.len();
    Json(state.facts[idx].clone())
}

#[debug_handler]
async fn get_fact(
    State(state): State<FactsState>,
    Path(id): Path<u64>,
) -> Result<Json<FactRecord>, StatusCode> {
    state.record(format!("GET /facts/{id}"));
    state
        .facts
        .iter()
        .find(|f| f.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn seed_facts() -> Vec<FactRecord> {
    [
        "Cats sleep for around 13 to 16 hours a day.",
        "A group of cats is called a clowder.",
        "Cats have over 20 muscles that control their ears.",
        "A cat's nose print is unique, much like a human fingerprint.",
        "Cats can rotate their ears 180 degrees.",
        "Most cats have no eyelashes.",
        "A cat can jump up to six times its length.",
        "Cats walk like camels and giraffes, both right feet then both left.",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, fact)| FactRecord {
        id: i as u64 + 1,
        fact: fact.to_string(),
        length: fact.len(),
    })
    .collect()
}
