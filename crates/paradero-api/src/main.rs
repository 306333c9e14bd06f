use std::sync::Arc;

use paradero_llm::GeminiClient;
use paradero_store::{DriveGateway, MemoryDraftStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paradero_api::config::ApiConfig;
use paradero_api::router::create_router;
use paradero_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paradero_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::load()?;

    tracing::info!(
        port = config.port,
        cors_origin = %config.cors_origin,
        gemini_model = %config.gemini_model,
        request_timeout_secs = config.request_timeout_secs,
        "Starting paradero API server"
    );

    let files = DriveGateway::from_env(config.request_timeout())?;
    let generator = GeminiClient::from_env(&config.gemini_model, config.request_timeout())?;

    let state = Arc::new(AppState::new(
        Arc::new(files),
        Arc::new(MemoryDraftStore::new()),
        Arc::new(generator),
    ));

    let app = create_router(state).layer(config.cors_layer()?);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
