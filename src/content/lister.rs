//! Posts directory listing

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::PostFile;
use crate::error::{BlogError, Result};

/// Read every `<identifier>.md` directly inside `posts_dir`
///
/// Files come back sorted by file name. Subdirectories and files with other
/// extensions are skipped. A missing directory or an unreadable file fails
/// the whole listing.
pub fn list_post_files(posts_dir: &Path) -> Result<Vec<PostFile>> {
    if !posts_dir.is_dir() {
        return Err(BlogError::NotFound(format!(
            "posts directory {:?}",
            posts_dir
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(posts_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| BlogError::Read {
            path: e.path().unwrap_or(posts_dir).to_path_buf(),
            source: e.into(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(identifier) = post_identifier(path) else {
            continue;
        };

        let raw_content = fs::read_to_string(path).map_err(|source| BlogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        files.push(PostFile {
            identifier,
            path: path.to_path_buf(),
            raw_content,
        });
    }

    tracing::debug!("Listed {} post files in {:?}", files.len(), posts_dir);

    Ok(files)
}

/// `hello.md` -> `hello`; anything else -> `None`
fn post_identifier(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => Some(stem.to_string()),
        None => {
            tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
            None
        }
    }
}
