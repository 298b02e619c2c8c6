//! Inbound message responders
//!
//! One responder is chosen at startup. The HTTP layer only sees the trait.

mod flow;
mod keyword;
mod single_shot;

pub use flow::FlowController;
pub use keyword::KeywordResponder;
pub use single_shot::SingleShotResponder;

use crate::completion::Completion;
use crate::config::{AppConfig, ResponderMode};
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;

/// One message delivered by the provider webhook
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    /// Caller identifier (phone number or `whatsapp:` address)
    pub from: String,
    pub body: String,
}

/// What to send back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    /// Acknowledge the webhook without messaging the caller
    Silent,
}

#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, inbound: &InboundMessage) -> Reply;

    fn name(&self) -> &'static str;
}

/// Build the responder selected by configuration.
///
/// With a finished-session TTL, the flow responder also spawns its eviction
/// sweeper, so this must run inside the tokio runtime.
pub fn build_responder(config: &AppConfig, completion: Completion) -> Arc<dyn Responder> {
    match config.mode {
        ResponderMode::Flow => {
            let flow = Arc::new(FlowController::new(
                Arc::new(SessionStore::new()),
                config.done_ttl,
            ));
            if config.done_ttl.is_some() {
                tokio::spawn(flow.clone().run_sweeper());
            }
            flow
        }
        ResponderMode::Keyword => Arc::new(KeywordResponder::new(completion)),
        ResponderMode::SingleShot => Arc::new(SingleShotResponder::new(completion)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_responder_follows_mode() {
        let mut config = AppConfig::default();
        assert_eq!(build_responder(&config, Completion::Unavailable).name(), "flow");

        config.mode = ResponderMode::Keyword;
        assert_eq!(build_responder(&config, Completion::Unavailable).name(), "keyword");

        config.mode = ResponderMode::SingleShot;
        assert_eq!(build_responder(&config, Completion::Unavailable).name(), "static");
    }

    #[tokio::test]
    async fn test_flow_with_ttl_starts_sweeper() {
        let config = AppConfig {
            done_ttl: Some(std::time::Duration::from_secs(30)),
            ..AppConfig::default()
        };
        let responder = build_responder(&config, Completion::Unavailable);
        assert_eq!(responder.name(), "flow");
    }
}
