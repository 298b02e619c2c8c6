//! Completion provider configuration

use super::{LlmService, LoggingService, OpenAIService};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the optional completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    /// Gateway base URL; requests go to `{gateway}/openai/v1/chat/completions`
    pub gateway: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gateway: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    /// Build from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            openai_api_key: non_blank("OPENAI_API_KEY"),
            gateway: non_blank("LLM_GATEWAY"),
            model: non_blank("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: non_blank("LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }

    /// Create the provider service, if credentials allow one.
    ///
    /// In gateway mode the key is "implicit" and the gateway authenticates.
    pub fn build_service(&self) -> Option<Arc<dyn LlmService>> {
        let api_key = match (&self.gateway, &self.openai_api_key) {
            (_, Some(key)) => key.clone(),
            (Some(_), None) => "implicit".to_string(),
            (None, None) => return None,
        };

        let service: Arc<dyn LlmService> = Arc::new(OpenAIService::new(
            api_key,
            self.model.clone(),
            self.gateway.as_deref(),
            self.timeout,
        ));
        Some(Arc::new(LoggingService::new(service)))
    }
}
