//! mdblog: a small markdown blog
//!
//! Posts are markdown files with optional YAML front-matter. The content
//! pipeline lists them, parses their metadata and renders their bodies; the
//! generator and the server turn the results into a home page and one page
//! per post.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub use error::BlogError;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Markdown posts directory
    pub posts_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Static assets copied or served as-is
    pub static_dir: std::path::PathBuf,
    renderer: Arc<content::MarkdownRenderer>,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
            static_dir,
            renderer: Arc::new(content::MarkdownRenderer::new()),
        }
    }

    /// Content loader for this blog's posts directory
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::with_renderer(&self.posts_dir, Arc::clone(&self.renderer))
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
