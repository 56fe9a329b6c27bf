mod utils;
#[allow(unused)]
use utils::*;

use mock_api::books::{BooksApi, BooksOptions};
use reqwest::Client;
use stampede::{RunReport, Scenario};

/// Runs one books iteration (1 VU, 1 iteration) against `api`.
async fn run_books_once(api: &BooksApi) -> RunReport {
    let addr = mock_api::serve(api.router()).await.unwrap();
    run_books_against(format!("http://{addr}")).await
}

async fn run_books_against(base_url: String) -> RunReport {
    let client = Client::new();
    Scenario::new("books-crud", move || {
        let client = client.clone();
        let base_url = base_url.clone();
        async move {
            scenarios::books::iteration(&client, &base_url).await;
        }
    })
    .vus(1)
    .iterations(1)
    .await
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn crud_lifecycle_threads_the_created_id() {
    init();
    let api = BooksApi::new(BooksOptions::default());
    let report = run_books_once(&api).await;

    assert_eq!(report.iterations, 1);
    assert_eq!(report.requests, 5);
    assert_eq!(report.failures, 0);
    assert!(report.passed());

    for name in [
        "GET /books status 200",
        "POST /books status 201",
        "GET /books/{id} status 200",
        "PUT /books/{id} status 200",
        "DELETE /books/{id} status 200",
    ] {
        let check = report.check(name).unwrap();
        assert_eq!((check.passes, check.failures), (1, 0), "check '{name}'");
    }

    // The fetch, update, and delete all target the id assigned by create.
    let log = api.requests();
    assert_eq!(
        log,
        vec![
            "GET /books",
            "POST /books",
            "GET /books/1",
            "PUT /books/1",
            "DELETE /books/1",
        ]
    );

    // Cleanup happened: the created record is gone.
    assert!(api.is_empty());
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn missing_id_skips_all_dependent_steps() {
    init();
    let api = BooksApi::new(BooksOptions {
        omit_created_id: true,
        ..Default::default()
    });
    let report = run_books_once(&api).await;

    assert_eq!(report.iterations, 1);
    assert_eq!(report.requests, 2);
    assert_eq!(report.checks.len(), 2);
    assert_eq!(
        (
            report.check("GET /books status 200").unwrap().passes,
            report.check("POST /books status 201").unwrap().passes,
        ),
        (1, 1)
    );

    // Zero requests ever hit /books/{id}.
    assert!(api
        .requests()
        .iter()
        .all(|line| !line.contains("/books/")));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn failed_list_check_does_not_stop_the_iteration() {
    init();
    let api = BooksApi::new(BooksOptions {
        fail_list: true,
        ..Default::default()
    });
    let report = run_books_once(&api).await;

    let list = report.check("GET /books status 200").unwrap();
    assert_eq!((list.passes, list.failures), (0, 1));

    // The iteration still ran the whole lifecycle.
    assert_eq!(report.requests, 5);
    let create = report.check("POST /books status 201").unwrap();
    assert_eq!((create.passes, create.failures), (1, 0));

    // A 500 is a check failure, not a transport failure.
    assert_eq!(report.failures, 0);
    assert!(report.passed());
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn update_body_carries_the_suffixed_title() {
    init();
    let api = BooksApi::new(BooksOptions::default());
    let addr = mock_api::serve(api.router()).await.unwrap();
    let base_url = format!("http://{addr}");
    let client = Client::new();

    let book = scenarios::books::generate_book();
    let res = client
        .post(format!("{base_url}/books"))
        .json(&book)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_u64().unwrap();

    let update = scenarios::books::updated(&book);
    let res = client
        .put(format!("{base_url}/books/{id}"))
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let stored = &api.books()[0];
    assert_eq!(stored.book.title, format!("{} (updated)", book.title));
    assert_eq!(stored.book.author, book.author);
    assert_eq!(stored.book.pages, book.pages);
    assert_eq!(stored.book.color, book.color);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn unreachable_api_counts_transport_failures() {
    init();
    // Grab a port that nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = run_books_against(format!("http://{addr}")).await;

    // List and create both fail in transit; no id, so nothing else is tried.
    assert_eq!(report.requests, 2);
    assert_eq!(report.failures, 2);
    assert_eq!(report.failure_rate(), 1.0);
    assert!(!report.passed());

    let list = report.check("GET /books status 200").unwrap();
    assert_eq!((list.passes, list.failures), (0, 1));
}
