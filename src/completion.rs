//! Free-form reply generation with a static fallback
//!
//! The provider is optional. Without credentials, or when a call fails or
//! times out, callers still get a usable reply text.

use crate::llm::{LlmConfig, LlmError, LlmMessage, LlmRequest, LlmService};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const SYSTEM_PROMPT: &str = "Você é o assistente da Casa/Mega Cleaning (PT/EN/ES). \
Seja direto, cordial e pró-ativo. Para orçamento, peça: ZIP, nº de quartos, nº de banheiros \
e tipo (Standard/Deep/Move-Out/Airbnb). Sugira 3 janelas (8–10, 10–12, 13–15). \
Nunca confirme reserva sem endereço + telefone + e-mail.";

/// Reply when no provider is configured or the provider call fails
pub const UNAVAILABLE_FALLBACK: &str = "Olá! Para estimar sua limpeza, me informe ZIP, \
nº de quartos/banheiros e o tipo (Standard/Deep/Move-Out). Posso oferecer janelas 8–10, \
10–12 ou 13–15. Qual prefere?";

/// Reply when the provider answers with nothing
pub const EMPTY_COMPLETION_FALLBACK: &str = "Certo! Como posso ajudar?";

const TEMPERATURE: f64 = 0.4;

/// Completion capability
#[derive(Clone)]
pub enum Completion {
    Available {
        service: Arc<dyn LlmService>,
        timeout: Duration,
    },
    Unavailable,
}

impl Completion {
    pub fn from_config(config: &LlmConfig) -> Self {
        match config.build_service() {
            Some(service) => Completion::Available {
                service,
                timeout: config.timeout,
            },
            None => Completion::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Completion::Available { .. })
    }

    /// Produce reply text for a free-form message. Never fails.
    pub async fn reply(&self, user_text: &str) -> String {
        let (service, limit) = match self {
            Completion::Available { service, timeout } => (service, *timeout),
            Completion::Unavailable => return UNAVAILABLE_FALLBACK.to_string(),
        };

        let request = LlmRequest {
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![LlmMessage::user(user_text)],
            max_tokens: None,
            temperature: Some(TEMPERATURE),
        };

        let result = timeout(limit, service.complete(&request))
            .await
            .unwrap_or_else(|_| Err(LlmError::timeout(limit)));

        match result {
            Ok(response) => {
                let text = response.text.trim();
                if text.is_empty() {
                    EMPTY_COMPLETION_FALLBACK.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Completion failed, using fallback");
                UNAVAILABLE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockLlmService;

    fn available(mock: Arc<MockLlmService>) -> Completion {
        Completion::Available {
            service: mock,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_unavailable_uses_static_text() {
        let completion = Completion::Unavailable;
        assert!(!completion.is_available());
        assert_eq!(completion.reply("oi").await, UNAVAILABLE_FALLBACK);
    }

    #[tokio::test]
    async fn test_available_returns_trimmed_completion() {
        let mock = Arc::new(MockLlmService::new());
        mock.queue_text("  Claro! Qual o seu ZIP?  \n");
        let completion = available(mock.clone());

        assert_eq!(completion.reply("quero limpeza").await, "Claro! Qual o seu ZIP?");

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(requests[0].messages, vec![LlmMessage::user("quero limpeza")]);
        assert_eq!(requests[0].temperature, Some(TEMPERATURE));
    }

    #[tokio::test]
    async fn test_empty_completion_has_its_own_fallback() {
        let mock = Arc::new(MockLlmService::new());
        mock.queue_text("   ");
        assert_eq!(available(mock).reply("?").await, EMPTY_COMPLETION_FALLBACK);
    }

    #[tokio::test]
    async fn test_provider_error_degrades() {
        let mock = Arc::new(MockLlmService::new());
        mock.queue_error(LlmError::auth("bad key"));
        assert_eq!(available(mock).reply("oi").await, UNAVAILABLE_FALLBACK);
    }

    #[tokio::test]
    async fn test_timeout_degrades() {
        let mock = Arc::new(MockLlmService::new().with_delay(Duration::from_secs(5)));
        mock.queue_text("too late");
        let completion = Completion::Available {
            service: mock,
            timeout: Duration::from_millis(50),
        };
        assert_eq!(completion.reply("oi").await, UNAVAILABLE_FALLBACK);
    }

    #[tokio::test]
    async fn test_failure_matches_unavailable_text() {
        let mock = Arc::new(MockLlmService::new());
        mock.queue_error(LlmError::server_error("overloaded"));
        let failed = available(mock).reply("oi").await;
        assert_eq!(failed, Completion::Unavailable.reply("oi").await);
    }

    #[test]
    fn test_from_config_without_key_is_unavailable() {
        let completion = Completion::from_config(&LlmConfig::default());
        assert!(!completion.is_available());
    }
}
