//! Content module - lists, parses and renders markdown posts

mod frontmatter;
mod lister;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use lister::list_post_files;
pub use loader::ContentLoader;
pub use markdown::{render_markdown, MarkdownRenderer};
pub use post::{sort_posts, PostFile, PostMetadata, RenderedPost, RoutePath};
