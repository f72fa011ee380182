use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use careerbot_llm::client::{ClientConfig, CompletionClient};
use careerbot_llm::gateway::Gateway;
use careerbot_server::config::ServerConfig;
use careerbot_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let store = careerbot_storage::store::open(&config.database_url).await?;

    let transport = CompletionClient::new(ClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
    })?;
    let gateway = Gateway::new(Arc::new(transport), config.llm.model.clone());

    let state = AppState {
        store,
        gateway: Arc::new(gateway),
    };

    let app = careerbot_server::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, model = %config.llm.model, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
    }
    tracing::info!("shutting down");
}
