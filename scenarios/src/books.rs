//! Books CRUD scenario: list, create, fetch, update, delete.
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use stampede::{check, transaction};

pub const COLORS: [&str; 3] = ["Red", "Green", "Blue"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Book {
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub color: String,
}

/// One iteration of the CRUD lifecycle against `base_url`.
///
/// Every status assertion is a non-fatal check. The fetch/update/delete
/// steps are skipped when the create response yields no id; no request is
/// ever issued with a missing path parameter.
pub async fn iteration(client: &Client, base_url: &str) {
    // Step 1: list all books
    let res = transaction(client.get(format!("{base_url}/books")).send()).await;
    check(
        "GET /books status 200",
        matches!(&res, Ok(r) if r.status() == StatusCode::OK),
    );

    // Step 2: create a new book
    let book = generate_book();
    let res = transaction(client.post(format!("{base_url}/books")).json(&book).send()).await;
    check(
        "POST /books status 201",
        matches!(&res, Ok(r) if r.status() == StatusCode::CREATED),
    );

    // Step 3: pull the assigned id out of the create response. An
    // unparseable body or a missing id silently skips the dependent steps.
    let book_id = match res {
        Ok(response) => match response.text().await {
            Ok(body) => extract_id(&body),
            Err(_) => None,
        },
        Err(_) => None,
    };

    if let Some(id) = book_id {
        // Step 4: get the newly created book
        let res = transaction(client.get(format!("{base_url}/books/{id}")).send()).await;
        check(
            "GET /books/{id} status 200",
            matches!(&res, Ok(r) if r.status() == StatusCode::OK),
        );

        // Step 5: update the book
        let update = updated(&book);
        let res = transaction(
            client
                .put(format!("{base_url}/books/{id}"))
                .json(&update)
                .send(),
        )
        .await;
        check(
            "PUT /books/{id} status 200",
            matches!(&res, Ok(r) if r.status() == StatusCode::OK),
        );

        // Step 6: delete the book
        let res = transaction(client.delete(format!("{base_url}/books/{id}")).send()).await;
        check(
            "DELETE /books/{id} status 200",
            matches!(&res, Ok(r) if r.status() == StatusCode::OK),
        );
    }
}

/// A fresh record with a random title suffix, page count in [50, 350), and
/// a color drawn uniformly from [`COLORS`].
pub fn generate_book() -> Book {
    let mut rng = rand::thread_rng();
    Book {
        author: "Performance Tester".to_string(),
        title: format!("Book {}", title_suffix(&mut rng)),
        pages: rng.gen_range(50..350),
        color: COLORS[rng.gen_range(0..COLORS.len())].to_string(),
    }
}

/// The full-replace body for the update step: same fields, title suffixed.
pub fn updated(book: &Book) -> Book {
    Book {
        title: format!("{} (updated)", book.title),
        ..book.clone()
    }
}

fn title_suffix(rng: &mut impl Rng) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Extracts an `id` field from a JSON body. Accepts numbers and non-empty
/// strings; anything else yields `None`.
pub(crate) fn extract_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
