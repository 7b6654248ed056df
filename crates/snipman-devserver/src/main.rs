use std::env;

use tracing_subscriber::EnvFilter;

use snipman_devserver::{AppState, SnippetStore, router};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let bind = env::var("SNIPMAN_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let app = router(AppState::new(SnippetStore::new()));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "snippet dev server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
