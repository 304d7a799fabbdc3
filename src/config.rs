//! Application configuration, loaded once from the environment at startup.
//!
//! Secrets are read exactly once and passed explicitly to the components
//! that need them; nothing in the crate reads ambient environment state
//! after startup. Parsing goes through an injected lookup function so tests
//! can supply fake credentials without touching the process environment.

use crate::errors::{Error, Result};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-001";

/// Maximum number of user/model exchanges kept per conversation.
pub const MAX_HISTORY_TURNS: usize = 10;

/// Longest reply chunk sent to Discord (the hard platform cap is 2000).
pub const MAX_RESPONSE_LENGTH: usize = 1990;

/// Upper bound on a user-supplied system instruction.
pub const SYSTEM_INSTRUCTION_MAX_LENGTH: usize = 1000;

/// Everything the bot needs to start: both credentials and the model name.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token for the Discord gateway.
    pub discord_token: String,
    /// API key for the Generative Language API.
    pub gemini_api_key: String,
    /// Gemini model identifier, e.g. `gemini-1.5-pro-001`.
    pub model: String,
}

impl AppConfig {
    /// Builds the configuration from an arbitrary lookup function.
    ///
    /// Both credentials are required; a missing one fails with a message
    /// naming the variable so the operator knows what to fix.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = require(&lookup, "DISCORD_TOKEN")?;
        let gemini_api_key = require(&lookup, "GEMINI_API_KEY")?;
        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            discord_token,
            gemini_api_key,
            model,
        })
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config {
            message: format!("{key} is not set"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_full_config_parses() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token123"),
            ("GEMINI_API_KEY", "key456"),
            ("GEMINI_MODEL", "gemini-custom"),
        ]))
        .unwrap();

        assert_eq!(config.discord_token, "token123");
        assert_eq!(config.gemini_api_key, "key456");
        assert_eq!(config.model, "gemini-custom");
    }

    #[test]
    fn test_model_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token123"),
            ("GEMINI_API_KEY", "key456"),
        ]))
        .unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_discord_token_names_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "key456")]))
            .unwrap_err();

        assert!(matches!(err, Error::Config { ref message } if message.contains("DISCORD_TOKEN")));
    }

    #[test]
    fn test_missing_gemini_key_names_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "token123")]))
            .unwrap_err();

        assert!(
            matches!(err, Error::Config { ref message } if message.contains("GEMINI_API_KEY"))
        );
    }

    #[test]
    fn test_blank_credential_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "   "),
            ("GEMINI_API_KEY", "key456"),
        ]))
        .unwrap_err();

        assert!(matches!(err, Error::Config { ref message } if message.contains("DISCORD_TOKEN")));
    }
}
