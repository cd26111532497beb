//! Post front matter parsing

use super::PostError;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_yaml::Value;

/// Metadata of one post, as declared in its front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    /// Identifier used in the tag mapping (`posts/<stem>.html`)
    pub id: String,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// Tags in declaration order, trimmed, case preserved
    pub tags: Vec<String>,
    pub draft: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    title: Option<String>,
    date: Option<Value>,
    tags: Option<Value>,
    #[serde(default)]
    draft: bool,
}

/// Extract the front matter block between the leading `---` markers
pub(crate) fn extract_frontmatter(content: &str) -> Option<&str> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let after_first = content.strip_prefix("---")?;
    let end_pos = after_first.find("\n---")?;
    Some(&after_first[..end_pos])
}

/// Parse a post's front matter into [`PostMeta`]
pub fn parse_post(id: impl Into<String>, content: &str) -> Result<PostMeta, PostError> {
    let id = id.into();
    let block = extract_frontmatter(content).ok_or_else(|| PostError::MissingFrontmatter(id.clone()))?;

    let raw: RawFrontmatter = if block.trim().is_empty() {
        RawFrontmatter::default()
    } else {
        serde_yaml::from_str(block).map_err(|source| PostError::Yaml {
            post: id.clone(),
            source,
        })?
    };

    let date = match raw.date {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(parse_date(&id, &s)?),
        Some(other) => {
            return Err(PostError::InvalidDate {
                post: id,
                value: format!("{:?}", other),
            })
        }
    };

    Ok(PostMeta {
        tags: raw.tags.map(split_tags).unwrap_or_default(),
        title: raw.title,
        date,
        draft: raw.draft,
        id,
    })
}

fn parse_date(post: &str, value: &str) -> Result<NaiveDate, PostError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| PostError::InvalidDate {
        post: post.to_string(),
        value: value.to_string(),
    })
}

/// Tags from a YAML list or a comma-separated string
fn split_tags(value: Value) -> Vec<String> {
    let pieces: Vec<String> = match value {
        Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    pieces
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
