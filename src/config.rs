//! Service configuration from environment variables

use crate::llm::LlmConfig;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

/// Which responder answers inbound messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponderMode {
    /// Stateful intake flow
    #[default]
    Flow,
    /// Stateless keyword routing with completion for everything else
    Keyword,
    /// One completion per message
    SingleShot,
}

impl FromStr for ResponderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flow" => Ok(Self::Flow),
            "keyword" => Ok(Self::Keyword),
            "static" => Ok(Self::SingleShot),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid RESPONDER_MODE {0:?}, expected flow, keyword or static")]
    InvalidMode(String),
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub mode: ResponderMode,
    pub llm: LlmConfig,
    /// How long a finished intake is kept; `None` keeps it forever
    pub done_ttl: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            mode: ResponderMode::default(),
            llm: LlmConfig::default(),
            done_ttl: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            host: parse_var("HOST", var("HOST"))?.unwrap_or(defaults.host),
            port: parse_var("PORT", var("PORT"))?.unwrap_or(defaults.port),
            mode: var("RESPONDER_MODE")
                .map(|v| v.parse::<ResponderMode>())
                .transpose()?
                .unwrap_or_default(),
            llm: LlmConfig::from_lookup(&lookup),
            done_ttl: parse_var::<u64>("SESSION_DONE_TTL_SECS", var("SESSION_DONE_TTL_SECS"))?
                .map(Duration::from_secs),
        })
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.mode, ResponderMode::Flow);
        assert!(config.done_ttl.is_none());
        assert!(config.llm.openai_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("RESPONDER_MODE", "Keyword"),
            ("SESSION_DONE_TTL_SECS", "86400"),
            ("OPENAI_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.mode, ResponderMode::Keyword);
        assert_eq!(config.done_ttl, Some(Duration::from_secs(86400)));
        assert_eq!(config.llm.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_static_mode() {
        assert_eq!(
            "static".parse::<ResponderMode>().unwrap(),
            ResponderMode::SingleShot
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            config(&[("RESPONDER_MODE", "chatty")]),
            Err(ConfigError::InvalidMode(_))
        ));
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("SESSION_DONE_TTL_SECS", "-1")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config(&[("PORT", " "), ("RESPONDER_MODE", "")]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.mode, ResponderMode::Flow);
    }
}
