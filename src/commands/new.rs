//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Scaffold `<posts_dir>/<slug>.md`; the slug defaults to the slugified title
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}; pass --slug", title);
    }

    fs::create_dir_all(&blog.posts_dir)?;
    let file_path = blog.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    // Quoted so YAML keeps the title a plain string whatever it contains
    let title_yaml = serde_json::to_string(title)?;
    let content = format!(
        "---\ntitle: {}\ndate: \"{}\"\nthumbnail: \"\"\n---\n",
        title_yaml,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
