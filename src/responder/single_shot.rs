use super::{InboundMessage, Reply, Responder};
use crate::completion::Completion;
use async_trait::async_trait;

/// Answers every message with one completion call and keeps no state
pub struct SingleShotResponder {
    completion: Completion,
}

impl SingleShotResponder {
    pub fn new(completion: Completion) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Responder for SingleShotResponder {
    async fn respond(&self, inbound: &InboundMessage) -> Reply {
        tracing::info!(
            caller = %inbound.from,
            available = self.completion.is_available(),
            "Single-shot reply"
        );
        Reply::Message(self.completion.reply(&inbound.body).await)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
