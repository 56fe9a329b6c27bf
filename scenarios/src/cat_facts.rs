//! Cat Facts scenario: paginated list, random fact, fetch by id.
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use stampede::{check, transaction};

pub const PAGE_SIZE: u32 = 5;

/// One read-only iteration against `base_url`.
///
/// The fetch-by-id step only runs when the paginated list yielded an id to
/// sample; an empty or malformed `data` list skips it silently.
pub async fn iteration(client: &Client, base_url: &str) {
    // Step 1: get a page of facts
    let res = transaction(
        client
            .get(format!("{base_url}/facts?limit={PAGE_SIZE}"))
            .send(),
    )
    .await;
    check(
        "GET /facts status 200",
        matches!(&res, Ok(r) if r.status() == StatusCode::OK),
    );

    let fact_id = match res {
        Ok(response) => match response.text().await {
            Ok(body) => sample_fact_id(&body, &mut rand::thread_rng()),
            Err(_) => None,
        },
        Err(_) => None,
    };

    // Step 2: get a single random fact, independent of the page above
    let res = transaction(client.get(format!("{base_url}/fact")).send()).await;
    check(
        "GET /fact status 200",
        matches!(&res, Ok(r) if r.status() == StatusCode::OK),
    );

    // Step 3: get a fact by id, if one was sampled
    if let Some(id) = fact_id {
        let res = transaction(client.get(format!("{base_url}/facts/{id}")).send()).await;
        check(
            "GET /facts/{id} status 200",
            matches!(&res, Ok(r) if r.status() == StatusCode::OK),
        );
    }
}

/// Samples one element of the body's `data` list uniformly and returns its
/// `id`. `None` when the body is not JSON, `data` is missing or empty, or
/// the sampled element has no usable id.
pub(crate) fn sample_fact_id(body: &str, rng: &mut impl Rng) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let data = value.get("data")?.as_array()?;
    if data.is_empty() {
        return None;
    }

    match data[rng.gen_range(0..data.len())].get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
