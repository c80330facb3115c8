//! OpenAI client configuration, loaded from TOML or the environment.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const ORGANIZATION_ENV: &str = "OPENAI_ORG_ID";
const PROJECT_ENV: &str = "OPENAI_PROJECT_ID";

/// Connection settings for an OpenAI-compatible endpoint.
///
/// ```toml
/// api_key = "sk-..."
/// base_url = "https://api.openai.com/v1"
/// organization = "org-..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenAiConfig {
    /// Secret API key. Required before a backend can be built.
    pub api_key: Option<String>,

    /// API root, without the trailing `/chat/completions`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `OpenAI-Organization` when set.
    pub organization: Option<String>,

    /// Sent as `OpenAI-Project` when set.
    pub project: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            organization: None,
            project: None,
        }
    }
}

impl OpenAiConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
    }

    /// Read configuration from `OPENAI_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_fallback()
    }

    /// Fill fields left unset from the environment.
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback(|key| std::env::var(key).ok())
    }

    fn with_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if self.api_key.is_none() {
            self.api_key = lookup(API_KEY_ENV);
        }
        if self.base_url == DEFAULT_BASE_URL {
            if let Some(url) = lookup(BASE_URL_ENV) {
                self.base_url = url;
            }
        }
        if self.organization.is_none() {
            self.organization = lookup(ORGANIZATION_ENV);
        }
        if self.project.is_none() {
            self.project = lookup(PROJECT_ENV);
        }
        self
    }

    /// The API key, or a config error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{API_KEY_ENV} not set and no api_key configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = OpenAiConfig::parse(
            r#"
            api_key = "sk-test"
            base_url = "http://localhost:8080/v1"
            organization = "org-1"
            project = "proj-1"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.organization.as_deref(), Some("org-1"));
        assert_eq!(config.project.as_deref(), Some("proj-1"));
    }

    #[test]
    fn parse_empty_uses_defaults() {
        let config = OpenAiConfig::parse("").unwrap();
        assert_eq!(config, OpenAiConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let err = OpenAiConfig::parse("api_key = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn fallback_fills_only_unset_fields() {
        let config = OpenAiConfig {
            api_key: Some("sk-file".into()),
            ..OpenAiConfig::default()
        }
        .with_fallback(|key| match key {
            API_KEY_ENV => Some("sk-env".into()),
            BASE_URL_ENV => Some("http://proxy/v1".into()),
            PROJECT_ENV => Some("  ".into()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.base_url, "http://proxy/v1");
        assert_eq!(config.organization, None);
        assert_eq!(config.project, None);
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let err = OpenAiConfig::default().require_api_key().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
