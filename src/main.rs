//! Cleaning intake webhook
//!
//! Answers inbound SMS/WhatsApp messages from the provider webhook, walking
//! each caller through a short cleaning-quote intake.

mod api;
mod completion;
mod config;
mod intake;
mod llm;
mod responder;
mod session;

use api::{create_router, AppState};
use completion::Completion;
use config::AppConfig;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cleaning_intake=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;

    let completion = Completion::from_config(&config.llm);
    if completion.is_available() {
        tracing::info!(model = %config.llm.model, "Completion provider configured");
    } else {
        tracing::warn!("No completion provider configured. Set OPENAI_API_KEY or LLM_GATEWAY.");
    }

    let responder = responder::build_responder(&config, completion);
    tracing::info!(
        responder = responder.name(),
        done_ttl_secs = config.done_ttl.map(|ttl| ttl.as_secs()),
        "Responder selected"
    );

    let app = create_router(AppState::new(responder)).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("Cleaning intake listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
