//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{BlogError, Result};

const MARKER: &str = "---";
const BOM: char = '\u{feff}';

/// Keys owned by the post itself; front-matter may not set them
const RESERVED_KEYS: [&str; 2] = ["identifier", "body_html"];

/// Front-matter data from a post
///
/// Only `title`, `date` and `thumbnail` are known by name. Every other key
/// lands in `extra`, in declaration order. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a leading `---` line has no front-matter: the result is
    /// empty metadata and the untouched input. A block that is opened but
    /// never closed is an error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let text = content.strip_prefix(BOM).unwrap_or(content);

        let (first_line, rest) = match text.find('\n') {
            Some(pos) => (&text[..pos], &text[pos + 1..]),
            None => (text, ""),
        };

        if first_line.trim_end() != MARKER {
            return Ok((FrontMatter::default(), content));
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == MARKER {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(BlogError::MalformedFrontMatter(
            "block opened with `---` is never closed".to_string(),
        ))
    }

    fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| BlogError::MalformedFrontMatter(e.to_string()))?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(FrontMatter::default()),
            _ => {
                return Err(BlogError::MalformedFrontMatter(
                    "expected a mapping of keys to values".to_string(),
                ))
            }
        };

        let mut fm = FrontMatter::default();
        for (key, value) in mapping {
            let Some(key) = value_to_string(key) else {
                continue;
            };
            let Some(value) = value_to_string(value) else {
                continue;
            };
            match key.as_str() {
                reserved if RESERVED_KEYS.contains(&reserved) => {
                    tracing::warn!("Ignoring reserved front-matter key `{}`", reserved);
                }
                "title" => fm.title = Some(value),
                "date" => fm.date = Some(value),
                "thumbnail" => fm.thumbnail = Some(value),
                _ => {
                    fm.extra.insert(key, value);
                }
            }
        }

        Ok(fm)
    }

    /// Look up any front-matter key, named or extra
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => self.title.as_deref(),
            "date" => self.date.as_deref(),
            "thumbnail" => self.thumbnail.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.thumbnail.is_none() && self.extra.is_empty()
    }
}

/// Flatten a YAML value into its text form. `null` means "absent".
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Tagged(tagged) => value_to_string(tagged.value),
        other => serde_json::to_string(&other)
            .ok()
            .or_else(|| serde_yaml::to_string(&other).ok().map(|s| s.trim_end().to_string())),
    }
}
