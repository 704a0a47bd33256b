//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{PostMetadata, RenderedPost};

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all blog templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping is off: URLs and the rendered post body go in as-is,
        // text fields are escaped explicitly in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("404.html", include_str!("blog/404.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Home page listing every post
    pub fn render_index(&self, site: &SiteConfig, posts: &[PostMetadata]) -> Result<String> {
        let mut context = base_context(site, true);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }

    /// A single post page; `body_html` is inserted without escaping
    pub fn render_post(&self, site: &SiteConfig, post: &RenderedPost) -> Result<String> {
        let mut context = base_context(site, false);
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// The "page not found" page
    pub fn render_not_found(&self, site: &SiteConfig) -> Result<String> {
        let context = base_context(site, false);
        self.render("404.html", &context)
    }

    /// Render a template with given context
    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

fn base_context(site: &SiteConfig, is_home: bool) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("is_home", &is_home);
    context
}
