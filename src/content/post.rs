//! Post models

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

use super::FrontMatter;
use crate::helpers::parse_date_string;

/// A markdown file in the posts directory, read but not parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFile {
    /// File name without the `.md` extension; the routing key
    pub identifier: String,

    /// Full source file path
    pub path: PathBuf,

    /// Full file text
    pub raw_content: String,
}

/// Metadata of one post: its identifier plus whatever the front-matter declares
///
/// Serializes flat, e.g. `{"identifier": "ssg-ssr", "title": "...", "date": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl PostMetadata {
    pub fn new(identifier: impl Into<String>, fm: FrontMatter) -> Self {
        Self {
            identifier: identifier.into(),
            title: fm.title,
            date: fm.date,
            thumbnail: fm.thumbnail,
            extra: fm.extra,
        }
    }

    /// Look up a field by its front-matter key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "identifier" => Some(self.identifier.as_str()),
            "title" => self.title.as_deref(),
            "date" => self.date.as_deref(),
            "thumbnail" => self.thumbnail.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// The `date` field, if it is in a recognised format
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// A post ready for display: metadata plus the rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPost {
    #[serde(flatten)]
    pub metadata: PostMetadata,

    /// Rendered HTML, trusted and inserted verbatim
    pub body_html: String,
}

/// One valid dynamic route, `/posts/<identifier>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePath {
    pub identifier: String,
}

impl RoutePath {
    /// URL path of the post page
    pub fn url(&self) -> String {
        format!("/posts/{}", self.identifier)
    }
}

/// Sort posts for the home page
///
/// `order_by` is `date`, `title` or `identifier`, with a leading `-` for
/// descending order. Posts missing the field always go last; ties fall back to
/// the identifier.
pub fn sort_posts(posts: &mut [PostMetadata], order_by: &str) {
    let (field, descending) = match order_by.strip_prefix('-') {
        Some(field) => (field, true),
        None => (order_by, false),
    };

    if !matches!(field, "date" | "title" | "identifier") {
        tracing::warn!("Unknown order_by field {:?}, ordering by identifier", field);
    }

    posts.sort_by(|a, b| {
        let ordering = match field {
            "date" => compare_present_first(a.parsed_date(), b.parsed_date(), descending),
            "title" => compare_present_first(a.title.as_deref(), b.title.as_deref(), descending),
            _ => directed(a.identifier.cmp(&b.identifier), descending),
        };
        ordering.then_with(|| a.identifier.cmp(&b.identifier))
    });
}

fn compare_present_first<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), descending),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(identifier: &str, title: Option<&str>, date: Option<&str>) -> PostMetadata {
        PostMetadata {
            identifier: identifier.to_string(),
            title: title.map(str::to_string),
            date: date.map(str::to_string),
            thumbnail: None,
            extra: IndexMap::new(),
        }
    }

    fn ids(posts: &[PostMetadata]) -> Vec<&str> {
        posts.iter().map(|p| p.identifier.as_str()).collect()
    }

    #[test]
    fn test_serializes_flat() {
        let mut post = meta("ssg-ssr", Some("SSG"), Some("2021-01-01"));
        post.extra.insert("author".to_string(), "Hiroe".to_string());

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "identifier": "ssg-ssr",
                "title": "SSG",
                "date": "2021-01-01",
                "author": "Hiroe",
            })
        );
    }

    #[test]
    fn test_rendered_post_serializes_flat() {
        let post = RenderedPost {
            metadata: meta("a", Some("A"), None),
            body_html: "<h1>Hi</h1>\n".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["identifier"], "a");
        assert_eq!(json["title"], "A");
        assert_eq!(json["body_html"], "<h1>Hi</h1>\n");
        assert!(json.get("date").is_none());
    }

    #[test]
    fn test_get_by_key() {
        let mut post = meta("a", Some("A"), None);
        post.extra.insert("lang".to_string(), "ja".to_string());
        assert_eq!(post.get("identifier"), Some("a"));
        assert_eq!(post.get("title"), Some("A"));
        assert_eq!(post.get("date"), None);
        assert_eq!(post.get("lang"), Some("ja"));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            meta("old", None, Some("2020-05-01")),
            meta("undated", None, None),
            meta("new", None, Some("2021/02/03")),
            meta("bad", None, Some("soon")),
        ];
        sort_posts(&mut posts, "-date");
        assert_eq!(ids(&posts), vec!["new", "old", "bad", "undated"]);
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let mut posts = vec![
            meta("x", Some("Beta"), None),
            meta("y", None, None),
            meta("z", Some("Alpha"), None),
        ];
        sort_posts(&mut posts, "title");
        assert_eq!(ids(&posts), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_sort_by_identifier_descending() {
        let mut posts = vec![meta("a", None, None), meta("c", None, None), meta("b", None, None)];
        sort_posts(&mut posts, "-identifier");
        assert_eq!(ids(&posts), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_route_url() {
        let route = RoutePath {
            identifier: "react-next".to_string(),
        };
        assert_eq!(route.url(), "/posts/react-next");
    }
}
