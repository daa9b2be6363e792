//! spacetraveling: a blog front-end backed by the Prismic content API
//!
//! Posts are read from the headless CMS, turned into display data (reading
//! time, localized dates, "load more" pagination) and rendered with Tera
//! templates, either into static files or on request by the built-in server.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentAdapter, PrismicClient};
use helpers::DateFormatter;

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a blog from a directory, reading `_config.yml` when present
    /// and the API settings from the environment
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let public_dir = base_dir.join(&config.public_dir);
        Self { config, public_dir }
    }

    /// HTTP client for the configured content API
    pub fn client(&self) -> Result<PrismicClient> {
        self.config.validate()?;
        Ok(PrismicClient::from_config(&self.config)?)
    }

    /// Adapter over the configured document type, reading the published
    /// content or the given preview ref
    pub fn adapter(&self, preview_ref: Option<String>) -> Result<ContentAdapter<PrismicClient>> {
        let adapter = ContentAdapter::new(self.client()?, &self.config.document_type);
        Ok(adapter.with_preview_ref(preview_ref))
    }

    pub fn formatter(&self) -> DateFormatter {
        DateFormatter::from_config(&self.config)
    }

    /// Generate the static site
    pub async fn generate(&self, preview_ref: Option<String>) -> Result<()> {
        commands::generate::run(self, preview_ref).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
