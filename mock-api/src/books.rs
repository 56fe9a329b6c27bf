//! Mock Books CRUD API.
use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Default)]
pub struct BooksOptions {
    /// `GET /books` returns 500.
    pub fail_list: bool,
    /// `POST /books` returns 201 with a body that has no `id` field.
    pub omit_created_id: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookPayload {
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub color: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct StoredBook {
    pub id: u64,
    #[serde(flatten)]
    pub book: BookPayload,
}

/// Handle to a mock Books service: builds the router and lets tests inspect
/// the store and the request log afterwards.
#[derive(Clone)]
pub struct BooksApi {
    state: BooksState,
}

impl BooksApi {
    pub fn new(options: BooksOptions) -> Self {
        Self {
            state: BooksState {
                store: Arc::new(RwLock::new(HashMap::new())),
                next_id: Arc::new(AtomicU64::new(0)),
                log: Arc::new(Mutex::new(Vec::new())),
                options,
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/books", get(list_books).post(create_book))
            .route(
                "/books/:id",
                get(get_book).put(update_book).delete(delete_book),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Every request seen so far, as "METHOD /path" lines in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.log.lock().unwrap().clone()
    }

    /// Current store contents, ordered by id.
    pub fn books(&self) -> Vec<StoredBook> {
        let mut books: Vec<_> = self.state.store.read().unwrap().values().cloned().collect();
        books.sort_by_key(|b| b.id);
        books
    }

    pub fn len(&self) -> usize {
        self.state.store.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
struct BooksState {
    store: Arc<RwLock<HashMap<u64, StoredBook>>>,
    next_id: Arc<AtomicU64>,
    log: Arc<Mutex<Vec<String>>>,
    options: BooksOptions,
}

impl BooksState {
    fn record(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

#[debug_handler]
async fn list_books(
    State(state): State<BooksState>,
) -> Result<Json<Vec<StoredBook>>, StatusCode> {
    state.record("GET /books".to_string());
    if state.options.fail_list {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let mut books: Vec<_> = state.store.read().unwrap().values().cloned().collect();
    books.sort_by_key(|b| b.id);
    Ok(Json(books))
}

#[debug_handler]
async fn create_book(
    State(state): State<BooksState>,
    Json(payload): Json<BookPayload>,
) -> (StatusCode, Json<Value>) {
    state.record("POST /books".to_string());

    let id = state.next_id.fetch_add(1, Ordering::Relaxed) + 1;
    let stored = StoredBook { id, book: payload };
    state.store.write().unwrap().insert(id, stored.clone());

    let body = if state.options.omit_created_id {
        serde_json::to_value(&stored.book)
    } else {
        serde_json::to_value(&stored)
    }
    .unwrap_or(Value::Null);

    (StatusCode::CREATED, Json(body))
}

#[debug_handler]
async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<u64>,
) -> Result<Json<StoredBook>, StatusCode> {
    state.record(format!("GET /books/{id}"));
    state
        .store
        .read()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[debug_handler]
async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<u64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<StoredBook>, StatusCode> {
    state.record(format!("PUT /books/{id}"));

    let mut store = state.store.write().unwrap();
    match store.get_mut(&id) {
        Some(stored) => {
            stored.book = payload;
            Ok(Json(stored.clone()))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

#[debug_handler]
async fn delete_book(State(state): State<BooksState>, Path(id): Path<u64>) -> StatusCode {
    state.record(format!("DELETE /books/{id}"));

    match state.store.write().unwrap().remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}
