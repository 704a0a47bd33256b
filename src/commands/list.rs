//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::sort_posts;
use crate::Blog;

/// Print every post in home page order
pub fn run(blog: &Blog) -> Result<()> {
    let stdout = std::io::stdout();
    write_posts(blog, &mut stdout.lock())
}

fn write_posts<W: Write>(blog: &Blog, out: &mut W) -> Result<()> {
    let mut posts = blog.loader().list_all_posts_metadata()?;
    sort_posts(&mut posts, &blog.config.index_generator.order_by);

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(
            out,
            "  {} - {} [{}]",
            post.date.as_deref().unwrap_or("----------"),
            post.title.as_deref().unwrap_or("(untitled)"),
            post.identifier
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_posts() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("a.md"), "---\ntitle: A\ndate: 2021-01-01\n---\n").unwrap();
        fs::write(posts.join("b.md"), "no front-matter").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let mut out = Vec::new();
        write_posts(&blog, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Posts (2):\n  2021-01-01 - A [a]\n  ---------- - (untitled) [b]\n"
        );
    }
}
