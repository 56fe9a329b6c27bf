//! Standalone mock Books API on 0.0.0.0:8080, for running the books
//! scenario binary locally.
use mock_api::books::{BooksApi, BooksOptions};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("mock_api=debug,tower_http=debug")
        .init();

    let api = BooksApi::new(BooksOptions::default());
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("mock books API listening on {}", listener.local_addr()?);
    axum::serve(listener, api.router()).await?;
    Ok(())
}
