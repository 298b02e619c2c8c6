//! Intake flow controller

use super::{InboundMessage, Reply, Responder};
use crate::intake::{normalize, prompts, transition, Outcome, Session, TransitionResult};
use crate::session::SessionStore;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on how long an expired finished session lingers in memory
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Drives each caller through the intake state machine
pub struct FlowController {
    store: Arc<SessionStore>,
    done_ttl: Option<TimeDelta>,
}

impl FlowController {
    pub fn new(store: Arc<SessionStore>, done_ttl: Option<Duration>) -> Self {
        Self {
            store,
            done_ttl: done_ttl.and_then(|ttl| TimeDelta::from_std(ttl).ok()),
        }
    }

    /// Handle one message and return the reply text.
    pub async fn handle(&self, caller_id: &str, text: &str) -> String {
        self.handle_at(caller_id, text, Utc::now()).await
    }

    async fn handle_at(&self, caller_id: &str, text: &str, now: DateTime<Utc>) -> String {
        let caller_id = caller_id.trim();
        // The provider always sends `From`. Without it there is no one to hold
        // a session for, and keying every anonymous message to "" would merge
        // unrelated conversations into one intake.
        if caller_id.is_empty() {
            tracing::warn!("Inbound message without caller id");
            return prompts::GENERIC_HELP.to_string();
        }

        let input = normalize(text);
        let mut guard = self.store.lock(caller_id).await;

        let current = guard
            .get()
            .filter(|session| !session.is_expired(self.done_ttl, now))
            .map(|session| &session.stage);
        let from = current.map(|stage| stage.name());

        let TransitionResult {
            new_stage,
            outcome,
            reply,
        } = transition(current, &input);

        tracing::info!(
            caller = %guard.caller_id(),
            from = from.unwrap_or("none"),
            to = new_stage.name(),
            ?outcome,
            "Intake transition"
        );
        tracing::debug!(caller = %guard.caller_id(), body = %text, "Intake message");
        if outcome == Outcome::Advanced && new_stage.is_done() {
            tracing::info!(
                caller = %guard.caller_id(),
                zip = new_stage.zip(),
                rooms = ?new_stage.rooms(),
                service = ?new_stage.service(),
                window = ?new_stage.window(),
                "Intake completed"
            );
        }

        match outcome {
            Outcome::Created | Outcome::Reset => {
                guard.remove();
                guard.put(Session::new(caller_id, now));
            }
            Outcome::Advanced => guard.put(Session {
                caller_id: caller_id.to_string(),
                stage: new_stage,
                updated_at: now,
            }),
            Outcome::Reprompted | Outcome::Unchanged => {}
        }
        self.store.release(guard).await;

        reply
    }

    /// Drop finished sessions older than the TTL. Returns how many went.
    pub async fn evict_expired(&self) -> usize {
        self.evict_expired_at(Utc::now()).await
    }

    async fn evict_expired_at(&self, now: DateTime<Utc>) -> usize {
        if self.done_ttl.is_none() {
            return 0;
        }
        self.store
            .evict(|session| session.is_expired(self.done_ttl, now))
            .await
    }

    /// Periodically evict expired sessions. Runs until the runtime shuts down.
    pub async fn run_sweeper(self: Arc<Self>) {
        let Some(ttl) = self.done_ttl.and_then(|ttl| ttl.to_std().ok()) else {
            return;
        };
        let period = ttl.clamp(Duration::from_secs(1), SWEEP_INTERVAL);
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = self.evict_expired().await;
            if evicted > 0 {
                tracing::info!(evicted, "Evicted expired sessions");
            }
        }
    }
}

#[async_trait]
impl Responder for FlowController {
    async fn respond(&self, inbound: &InboundMessage) -> Reply {
        Reply::Message(self.handle(&inbound.from, &inbound.body).await)
    }

    fn name(&self) -> &'static str {
        "flow"
    }
}
