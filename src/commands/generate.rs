//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    let summary = generator.generate().await?;

    tracing::info!(
        "Generated {} posts and copied {} assets into {:?} in {:.2}s",
        summary.posts,
        summary.assets,
        blog.public_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
