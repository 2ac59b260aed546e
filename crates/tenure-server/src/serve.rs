use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::llm::OllamaClient;
use std::sync::Arc;
use tenure_core::{JsonContractStore, JsonSessionStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting Tenure server v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Data: {:?}", config.data_dir);

    // Open stores (auto-created with empty documents on first run)
    let contracts = Arc::new(JsonContractStore::open(config.contracts_path())?);
    let sessions = Arc::new(JsonSessionStore::open(config.sessions_path())?);
    info!(
        "Stores loaded: {} contracts, {} sessions",
        contracts.count()?,
        sessions.count()?
    );

    // Inference gateway; the endpoint is only contacted per request
    let llm = Arc::new(OllamaClient::new(
        &config.ollama_url,
        &config.model,
        config.llm_timeout(),
    )?);
    info!("Model endpoint: {} (model: {})", config.ollama_url, llm.model());

    let app_state = AppState {
        contracts,
        sessions,
        llm,
        start_time: std::time::Instant::now(),
    };

    let app = create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let http_task = {
        let addr = config.http_addr;
        tokio::spawn(async move {
            info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .expect("Failed to bind HTTP server");
            axum::serve(listener, app).await.expect("HTTP server failed");
        })
    };

    info!("Tenure server ready");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, terminating...");
    http_task.abort();

    Ok(())
}
