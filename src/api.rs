//! HTTP API: provider webhook and health check

mod handlers;
mod twiml;
mod types;

pub use handlers::create_router;

use crate::responder::Responder;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<dyn Responder>,
}

impl AppState {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self { responder }
    }
}
