//! Generator module - writes the static site using the built-in templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{sort_posts, ContentLoader};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// What a generation run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub posts: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    loader: ContentLoader,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            loader: blog.loader(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    ///
    /// Every page is rendered before anything is written, so a failure in
    /// the content pipeline aborts the build with `public_dir` untouched.
    pub async fn generate(&self) -> Result<GenerateSummary> {
        let mut pages = vec![(PathBuf::from("index.html"), self.render_index_page()?)];
        let posts = self.render_post_pages(&mut pages).await?;
        let not_found = self.renderer.render_not_found(&self.blog.config)?;
        pages.push((PathBuf::from("404.html"), not_found));

        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create dir {:?}", self.blog.public_dir))?;

        let assets = self.copy_static_assets()?;
        for (relative, html) in &pages {
            self.write_page(relative, html)?;
        }

        Ok(GenerateSummary { posts, assets })
    }

    /// Render the home page
    fn render_index_page(&self) -> Result<String> {
        let mut posts = self.loader.list_all_posts_metadata()?;
        sort_posts(&mut posts, &self.blog.config.index_generator.order_by);

        self.renderer.render_index(&self.blog.config, &posts)
    }

    /// Render one page per route
    async fn render_post_pages(&self, pages: &mut Vec<(PathBuf, String)>) -> Result<usize> {
        let routes = self.loader.enumerate_routes()?;

        for route in &routes {
            let post = self.loader.get_single_post(&route.identifier).await?;
            let html = self.renderer.render_post(&self.blog.config, &post)?;

            let output = Path::new(route.url().trim_start_matches('/')).join("index.html");
            pages.push((output, html));
        }

        Ok(routes.len())
    }

    /// Write a page relative to the public directory
    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy static assets (images, favicon, ...) to the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            copied += 1;
        }

        Ok(copied)
    }
}
