//! HTTP request handlers

use super::twiml::Twiml;
use super::types::InboundForm;
use super::AppState;
use crate::responder::{InboundMessage, Reply};
use axum::{
    extract::State,
    routing::{get, post},
    Form, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Provider webhook
        .route("/twilio/inbound", post(inbound))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn inbound(State(state): State<AppState>, Form(form): Form<InboundForm>) -> Twiml {
    let message = InboundMessage::from(form);
    let reply = state.responder.respond(&message).await;

    tracing::info!(
        caller = %message.from,
        responder = state.responder.name(),
        silent = matches!(reply, Reply::Silent),
        "Inbound handled"
    );
    Twiml(reply)
}

async fn get_version() -> &'static str {
    concat!("cleaning-intake ", env!("CARGO_PKG_VERSION"))
}
