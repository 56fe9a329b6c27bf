//! Cat Facts load test against the public https://catfact.ninja API.
//! Configure with `VUS` and `DURATION`.
use anyhow::Result;
use reqwest::Client;
use scenarios::{cat_facts, CAT_FACTS_URL, ITERATION_PAUSE};
use stampede::{RunConfig, Scenario};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("stampede=info,scenarios=info")
        .init();

    let config = RunConfig::from_env("cat-facts")?;

    let client = Client::new();
    let report = Scenario::new("cat-facts", move || {
        let client = client.clone();
        async move {
            cat_facts::iteration(&client, CAT_FACTS_URL).await;
            tokio::time::sleep(ITERATION_PAUSE).await;
        }
    })
    .config(config)
    .await;

    println!("{report}");
    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
