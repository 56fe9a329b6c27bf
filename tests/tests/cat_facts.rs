mod utils;
#[allow(unused)]
use utils::*;

use mock_api::facts::{FactsApi, FactsOptions};
use reqwest::Client;
use stampede::{RunReport, Scenario};

async fn run_cat_facts_once(api: &FactsApi) -> RunReport {
    let addr = mock_api::serve(api.router()).await.unwrap();
    let base_url = format!("http://{addr}");
    let client = Client::new();

    Scenario::new("cat-facts", move || {
        let client = client.clone();
        let base_url = base_url.clone();
        async move {
            scenarios::cat_facts::iteration(&client, &base_url).await;
        }
    })
    .vus(1)
    .iterations(1)
    .await
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn fetch_by_id_uses_a_listed_fact() {
    init();
    let api = FactsApi::new(FactsOptions::default());
    let report = run_cat_facts_once(&api).await;

    assert_eq!(report.iterations, 1);
    assert_eq!(report.requests, 3);
    assert_eq!(report.failures, 0);
    assert!(report.passed());

    for name in [
        "GET /facts status 200",
        "GET /fact status 200",
        "GET /facts/{id} status 200",
    ] {
        let check = report.check(name).unwrap();
        assert_eq!((check.passes, check.failures), (1, 0), "check '{name}'");
    }

    let log = api.requests();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], "GET /facts");
    assert_eq!(log[1], "GET /fact");

    // The by-id fetch targets one of the ids the list returned.
    let id: u64 = log[2]
        .strip_prefix("GET /facts/")
        .and_then(|id| id.parse().ok())
        .unwrap();
    assert!(api.fact_ids().contains(&id));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn empty_data_list_skips_the_by_id_fetch() {
    init();
    let api = FactsApi::new(FactsOptions { empty_data: true });
    let report = run_cat_facts_once(&api).await;

    assert_eq!(report.requests, 2);
    assert_eq!(report.checks.len(), 2);
    assert!(report.check("GET /facts/{id} status 200").is_none());

    // No request ever hit /facts/{id}.
    assert!(api
        .requests()
        .iter()
        .all(|line| !line.starts_with("GET /facts/")));
}
