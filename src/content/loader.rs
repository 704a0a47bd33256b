//! Content loader - the post pipeline used by the home page, post pages and routes

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::lister::list_post_files;
use super::markdown::render_markdown;
use super::{FrontMatter, MarkdownRenderer, PostFile, PostMetadata, RenderedPost, RoutePath};
use crate::error::{BlogError, Result};

/// Loads posts from a posts directory
///
/// Every call goes back to disk; nothing is cached between calls.
#[derive(Clone)]
pub struct ContentLoader {
    posts_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl ContentLoader {
    /// Create a loader with its own markdown renderer
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self::with_renderer(posts_dir, Arc::new(MarkdownRenderer::new()))
    }

    /// Create a loader sharing an existing renderer
    pub fn with_renderer<P: Into<PathBuf>>(posts_dir: P, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Read every post file
    pub fn list_post_files(&self) -> Result<Vec<PostFile>> {
        list_post_files(&self.posts_dir)
    }

    /// Metadata of every post, in identifier order
    ///
    /// One malformed post fails the whole listing.
    pub fn list_all_posts_metadata(&self) -> Result<Vec<PostMetadata>> {
        self.list_post_files()?
            .into_iter()
            .map(|file| -> Result<PostMetadata> {
                let (fm, _) = FrontMatter::parse(&file.raw_content).map_err(|e| {
                    tracing::error!("Failed to parse post {:?}: {}", file.path, e);
                    e
                })?;
                Ok(PostMetadata::new(file.identifier, fm))
            })
            .collect()
    }

    /// Load and render a single post
    pub async fn get_single_post(&self, identifier: &str) -> Result<RenderedPost> {
        if !is_valid_identifier(identifier) {
            return Err(BlogError::NotFound(format!("post {:?}", identifier)));
        }

        let path = self.posts_dir.join(format!("{}.md", identifier));
        if !path.is_file() {
            return Err(BlogError::NotFound(format!("post {:?}", identifier)));
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BlogError::NotFound(format!("post {:?}", identifier)));
            }
            Err(source) => return Err(BlogError::Read { path, source }),
        };

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| {
            tracing::error!("Failed to parse post {:?}: {}", path, e);
            e
        })?;
        let body_html = render_markdown(&self.renderer, body.to_string()).await?;

        tracing::debug!("Rendered post {:?}", identifier);

        Ok(RenderedPost {
            metadata: PostMetadata::new(identifier, fm),
            body_html,
        })
    }

    /// Every valid `/posts/<identifier>` route
    pub fn enumerate_routes(&self) -> Result<Vec<RoutePath>> {
        Ok(self
            .list_post_files()?
            .into_iter()
            .map(|file| RoutePath {
                identifier: file.identifier,
            })
            .collect())
    }
}

/// An identifier must name a file directly inside the posts directory
fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_list_all_posts_metadata() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", "---\ntitle: A\n---\nbody a");
        write_post(dir.path(), "b.md", "---\ntitle: B\ndate: 2021-02-01\n---\nbody b");

        let loader = ContentLoader::new(dir.path());
        let posts = loader.list_all_posts_metadata().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].identifier, "a");
        assert_eq!(posts[0].title.as_deref(), Some("A"));
        assert_eq!(posts[1].identifier, "b");
        assert_eq!(posts[1].title.as_deref(), Some("B"));
        assert_eq!(posts[1].date.as_deref(), Some("2021-02-01"));
    }

    #[test]
    fn test_one_malformed_post_fails_listing() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "good.md", "---\ntitle: Good\n---\n");
        write_post(dir.path(), "bad.md", "---\ntitle: Bad\n");

        let loader = ContentLoader::new(dir.path());
        let err = loader.list_all_posts_metadata().unwrap_err();
        assert!(matches!(err, BlogError::MalformedFrontMatter(_)));
    }

    #[tokio::test]
    async fn test_get_single_post() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "hello.md",
            "---\ntitle: \"Hello\"\ndate: \"2021-01-01\"\n---\n# Hi",
        );

        let loader = ContentLoader::new(dir.path());
        let post = loader.get_single_post("hello").await.unwrap();

        assert_eq!(post.metadata.identifier, "hello");
        assert_eq!(post.metadata.title.as_deref(), Some("Hello"));
        assert_eq!(post.metadata.date.as_deref(), Some("2021-01-01"));
        assert_eq!(post.body_html.trim(), "<h1>Hi</h1>");
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(dir.path());
        let err = loader.get_single_post("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_post_that_is_a_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let loader = ContentLoader::new(dir.path());
        assert!(loader.enumerate_routes().unwrap().is_empty());
        let err = loader.get_single_post("drafts").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_unreadable_post_is_read_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.md"), [0xff, 0xfe, 0xfd]).unwrap();

        let loader = ContentLoader::new(dir.path());
        let err = loader.get_single_post("x").await.unwrap_err();
        match err {
            BlogError::Read { path, source } => {
                assert_eq!(path, dir.path().join("x.md"));
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_frontmatter_cannot_override_identifier() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "real.md",
            "---\ntitle: T\nidentifier: other\nbody_html: SHADOW\n---\nreal body",
        );

        let loader = ContentLoader::new(dir.path());
        let posts = loader.list_all_posts_metadata().unwrap();
        let json = serde_json::to_value(&posts[0]).unwrap();
        assert_eq!(json, serde_json::json!({ "identifier": "real", "title": "T" }));

        let post = loader.get_single_post("real").await.unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["identifier"], "real");
        assert_eq!(json["body_html"].as_str().unwrap().trim(), "<p>real body</p>");
        assert_eq!(
            loader.enumerate_routes().unwrap(),
            vec![RoutePath { identifier: "real".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_get_post_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        write_post(dir.path(), "secret.md", "top secret");

        let loader = ContentLoader::new(&posts);
        for id in ["../secret", "..", "", "a/b"] {
            let err = loader.get_single_post(id).await.unwrap_err();
            assert!(err.is_not_found(), "{:?} should be not found", id);
        }
    }

    #[tokio::test]
    async fn test_get_post_with_unterminated_frontmatter() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "broken.md", "---\ntitle: Broken\n# body");

        let loader = ContentLoader::new(dir.path());
        let err = loader.get_single_post("broken").await.unwrap_err();
        assert!(matches!(err, BlogError::MalformedFrontMatter(_)));
    }

    #[test]
    fn test_enumerate_routes() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "ssg-ssr.md", "");
        write_post(dir.path(), "react-next.md", "");

        let loader = ContentLoader::new(dir.path());
        let routes = loader.enumerate_routes().unwrap();
        assert_eq!(
            routes,
            vec![
                RoutePath {
                    identifier: "react-next".to_string()
                },
                RoutePath {
                    identifier: "ssg-ssr".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_enumerate_routes_missing_dir() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(dir.path().join("missing"));
        assert!(loader.enumerate_routes().unwrap_err().is_not_found());
    }
}
