//! Books CRUD load test. Configure with `VUS`, `DURATION`, and `API_URL`.
use anyhow::Result;
use reqwest::Client;
use scenarios::{api_url, books, ITERATION_PAUSE};
use stampede::{RunConfig, Scenario};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("stampede=info,scenarios=info")
        .init();

    let config = RunConfig::from_env("books-crud")?;
    let base_url = api_url();
    tracing::info!("Targeting {base_url}");

    let client = Client::new();
    let report = Scenario::new("books-crud", move || {
        let client = client.clone();
        let base_url = base_url.clone();
        async move {
            books::iteration(&client, &base_url).await;
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
