//! In-process doubles for the APIs the scenarios drive: a Books CRUD store
//! and a Cat Facts lookalike. Both record every request they see and expose
//! knobs for the failure paths the scenarios must tolerate.
use axum::Router;
use std::net::SocketAddr;

pub mod books;
pub mod facts;

/// Serves `router` on an ephemeral local port in a background task.
pub async fn serve(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            tracing::error!("mock server exited: {err}");
        }
    });
    Ok(addr)
}
