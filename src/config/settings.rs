//! Application settings and API credentials.

use std::path::PathBuf;

use secrecy::Secret;
use serde::{Deserialize, Serialize};

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the language-model API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Secrets required before the bot can serve any chat.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Telegram bot token (obtain from `@BotFather`).
    pub bot_token: Secret<String>,

    /// API key for the chat-completions endpoint.
    pub api_key: Secret<String>,
}

impl Credentials {
    /// Creates credentials from raw strings.
    #[must_use]
    pub fn new(bot_token: String, api_key: String) -> Self {
        Self {
            bot_token: Secret::new(bot_token),
            api_key: Secret::new(api_key),
        }
    }

    /// Creates credentials from environment variables.
    ///
    /// Expects `BOT_TOKEN` and `OPENAI_API_KEY` to be set. An empty value
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates credentials using an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar(key))
        };

        let bot_token = required(BOT_TOKEN_VAR)?;
        let api_key = required(API_KEY_VAR)?;

        Ok(Self::new(bot_token, api_key))
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Model name sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on generated tokens per answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Page scraped by the `/benchmarks` command.
    #[serde(default = "default_benchmarks_url")]
    pub benchmarks_url: String,

    /// Long-polling timeout for `getUpdates` in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u32,

    /// Append website, social media, PPC and audience answers to the summary.
    #[serde(default)]
    pub summary_include_all_fields: bool,

    /// Optional industry catalog file. The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_owned()
}

fn default_api_base_url() -> String {
    "https://api.openai.com".to_owned()
}

fn default_max_tokens() -> u32 {
    200
}

fn default_benchmarks_url() -> String {
    "https://databox.com/ppc-industry-benchmarks".to_owned()
}

fn default_poll_timeout() -> u32 {
    30
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            max_tokens: default_max_tokens(),
            benchmarks_url: default_benchmarks_url(),
            poll_timeout_secs: default_poll_timeout(),
            summary_include_all_fields: false,
            catalog_path: None,
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates bot settings from an arbitrary variable lookup with defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            model: lookup("OPENAI_MODEL").unwrap_or_else(default_model),
            api_base_url: lookup("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(default_api_base_url),
            max_tokens: lookup("OPENAI_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_tokens),
            benchmarks_url: lookup("BENCHMARKS_URL").unwrap_or_else(default_benchmarks_url),
            poll_timeout_secs: lookup("POLL_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_poll_timeout),
            summary_include_all_fields: lookup("SUMMARY_INCLUDE_ALL_FIELDS")
                .is_some_and(|s| parse_flag(&s)),
            catalog_path: lookup("INDUSTRY_CATALOG").map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = BotSettings::default();
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.max_tokens, 200);
        assert_eq!(settings.poll_timeout_secs, 30);
        assert!(!settings.summary_include_all_fields);
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds =
            Credentials::from_lookup(env(&[("BOT_TOKEN", "123:abc"), ("OPENAI_API_KEY", "sk-1")]))
                .unwrap();
        assert_eq!(creds.bot_token.expose_secret(), "123:abc");
        assert_eq!(creds.api_key.expose_secret(), "sk-1");
    }

    #[test]
    fn test_credentials_missing_token() {
        let err = Credentials::from_lookup(env(&[("OPENAI_API_KEY", "sk-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("BOT_TOKEN")));
    }

    #[test]
    fn test_credentials_empty_key_is_missing() {
        let err = Credentials::from_lookup(env(&[("BOT_TOKEN", "123:abc"), ("OPENAI_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("OPENAI_API_KEY")));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials::new("123:abc".to_owned(), "sk-secret".to_owned());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("123:abc"));
    }

    #[test]
    fn test_settings_from_lookup_overrides() {
        let settings = BotSettings::from_lookup(env(&[
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_BASE_URL", "http://localhost:8080/"),
            ("OPENAI_MAX_TOKENS", "50"),
            ("SUMMARY_INCLUDE_ALL_FIELDS", "true"),
            ("INDUSTRY_CATALOG", "industries.json"),
        ]));
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.max_tokens, 50);
        assert!(settings.summary_include_all_fields);
        assert_eq!(settings.catalog_path, Some(PathBuf::from("industries.json")));
    }

    #[test]
    fn test_settings_invalid_numbers_fall_back() {
        let settings = BotSettings::from_lookup(env(&[
            ("OPENAI_MAX_TOKENS", "lots"),
            ("POLL_TIMEOUT_SECS", "-1"),
            ("SUMMARY_INCLUDE_ALL_FIELDS", "maybe"),
        ]));
        assert_eq!(settings.max_tokens, 200);
        assert_eq!(settings.poll_timeout_secs, 30);
        assert!(!settings.summary_include_all_fields);
    }
}
