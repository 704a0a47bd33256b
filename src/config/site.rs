//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,

    // Home page
    pub intro: String,
    pub blog_heading: String,
    pub profile_image: String,
    pub favicon: String,
    #[serde(default)]
    pub index_generator: IndexGeneratorConfig,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Serving
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Next.js Blog".to_string(),
            author: "Hiroe".to_string(),
            description: String::new(),
            language: "en".to_string(),

            intro: "This is a sample website.".to_string(),
            blog_heading: "📝 A beginner engineer's blog".to_string(),
            profile_image: "/images/profile.jpeg".to_string(),
            favicon: "/favicon.ico".to_string(),
            index_generator: IndexGeneratorConfig::default(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            server: ServerConfig::default(),
            api: ApiConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Home page ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexGeneratorConfig {
    /// `date`, `title` or `identifier`; a leading `-` sorts descending
    pub order_by: String,
}

impl Default for IndexGeneratorConfig {
    fn default() -> Self {
        Self {
            order_by: "-date".to_string(),
        }
    }
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Demo API route settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Upstream queried by `/api/hello`
    pub users_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            users_url: "https://jsonplaceholder.typicode.com/users".to_string(),
        }
    }
}
