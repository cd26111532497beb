//! Building the tag mapping from markdown posts
//!
//! Each post declares its tags in YAML front matter, either as a list or as
//! a comma-separated string:
//!
//! ```text
//! ---
//! title: Black Mamba
//! date: 2024-03-01
//! tags: venomous snakes, black mamba, reptiles
//! ---
//! ```
//!
//! Drafts are left out, as are posts without tags (a mapping entry needs at
//! least one tag).

mod frontmatter;

pub use frontmatter::{parse_post, PostMeta};

use crate::mapping::{MappingError, PostId, TagMapping};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors that can occur while reading posts
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Post {0} has no front matter")]
    MissingFrontmatter(String),

    #[error("Invalid front matter in {post}: {source}")]
    Yaml {
        post: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid date '{value}' in {post}, expected YYYY-MM-DD")]
    InvalidDate { post: String, value: String },
}

/// Identifier of the post rendered from `path`: `<prefix>/<stem>.html`
pub fn post_id_for(path: &Path, prefix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}.html", stem)
    } else {
        format!("{}/{}.html", prefix, stem)
    }
}

/// Read every `.md` file under `dir`
///
/// Posts are ordered newest first; undated posts and ties fall back to the
/// identifier.
pub fn scan_posts(dir: impl AsRef<Path>, prefix: &str) -> Result<Vec<PostMeta>, PostError> {
    let dir = dir.as_ref();
    let mut posts = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| PostError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "md") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| PostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let post = parse_post(post_id_for(path, prefix), &content)?;
        debug!(post = %post.id, tags = post.tags.len(), "read post");
        posts.push(post);
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    Ok(posts)
}

/// Tag mapping for the published posts
pub fn mapping_from_posts(posts: &[PostMeta]) -> Result<TagMapping, MappingError> {
    let entries = posts.iter().filter_map(|post| {
        if post.draft {
            debug!(post = %post.id, "skipping draft");
            return None;
        }
        if post.tags.is_empty() {
            warn!(post = %post.id, "post has no tags, leaving it out of the mapping");
            return None;
        }
        Some((PostId::new(post.id.clone()), post.tags.clone()))
    });
    TagMapping::new(entries)
}
