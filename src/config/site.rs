//! Blog configuration (_config.yml)

use anyhow::{bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::i18n::Locale;

/// Environment variable overriding `api_endpoint`
pub const ENV_API_ENDPOINT: &str = "PRISMIC_API_ENDPOINT";
/// Environment variable overriding `access_token`
pub const ENV_ACCESS_TOKEN: &str = "PRISMIC_ACCESS_TOKEN";

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,

    // Content API
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub request_timeout_secs: u64,

    // Listing
    pub page_size: usize,

    // Display
    pub locale: String,
    pub timezone: String,

    // Output
    pub public_dir: String,

    // Comments widget
    pub comments: Option<CommentsConfig>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),

            api_endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            request_timeout_secs: 30,

            page_size: 1,

            locale: "pt-BR".to_string(),
            timezone: "UTC".to_string(),

            public_dir: "public".to_string(),

            comments: None,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_ENDPOINT).ok(),
            std::env::var(ENV_ACCESS_TOKEN).ok(),
        );
    }

    /// Override API settings; empty values are ignored
    pub fn apply_overrides(&mut self, endpoint: Option<String>, token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!("Using API endpoint from environment");
            self.api_endpoint = endpoint;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// Check the settings needed to talk to the content API
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            bail!(
                "No content API endpoint configured. Set `api_endpoint` in _config.yml or {}",
                ENV_API_ENDPOINT
            );
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(())
    }

    /// Display locale; unknown tags fall back to the default
    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown locale '{}', using {}",
                self.locale,
                Locale::default().tag()
            );
            Locale::default()
        })
    }

    /// Display timezone; unknown names fall back to UTC
    pub fn timezone(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone '{}', using UTC", self.timezone);
            Tz::UTC
        })
    }
}

/// utterances comments widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// GitHub repository holding the comment issues (`owner/name`)
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "github-dark-orange".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.document_type, "posts");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.locale(), Locale::PtBr);
        assert_eq!(config.timezone(), Tz::UTC);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
api_endpoint: https://desafio.cdn.prismic.io/api/v2
page_size: 5
locale: en-US
timezone: America/Sao_Paulo
comments:
  repo: owner/blog-comments
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.locale(), Locale::EnUs);
        assert_eq!(config.timezone(), chrono_tz::America::Sao_Paulo);
        let comments = config.comments.as_ref().unwrap();
        assert_eq!(comments.repo, "owner/blog-comments");
        assert_eq!(comments.issue_term, "pathname");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = BlogConfig::default();
        config.apply_overrides(Some("https://x.cdn.prismic.io/api/v2".into()), Some(String::new()));
        assert_eq!(config.api_endpoint, "https://x.cdn.prismic.io/api/v2");
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_unknown_locale_and_timezone_fall_back() {
        let config = BlogConfig {
            locale: "xx".to_string(),
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(config.locale(), Locale::PtBr);
        assert_eq!(config.timezone(), Tz::UTC);
    }
}
