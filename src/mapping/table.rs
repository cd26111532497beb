//! The static post → tags table

use super::post_id::PostId;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or loading a tag mapping
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Duplicate post in tag mapping: {0}")]
    DuplicatePost(PostId),

    #[error("Post has no tags: {0}")]
    EmptyTags(PostId),

    #[error("Unsupported mapping format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

/// A tag together with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Immutable mapping from post identifier to its ordered tag list
///
/// Keys are unique and every tag list is non-empty. Insertion order is
/// kept, so filtering and serialization walk posts in the order they were
/// declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMapping {
    entries: Vec<(PostId, Vec<String>)>,
    index: HashMap<PostId, usize>,
}

impl TagMapping {
    /// Build a mapping, rejecting duplicate posts and empty tag lists
    pub fn new<I, P, T, S>(entries: I) -> MappingResult<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<PostId>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mapping = Self::default();
        for (post, tags) in entries {
            let post = post.into();
            let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
            if tags.is_empty() {
                return Err(MappingError::EmptyTags(post));
            }
            if mapping.index.contains_key(&post) {
                return Err(MappingError::DuplicatePost(post));
            }
            mapping.index.insert(post.clone(), mapping.entries.len());
            mapping.entries.push((post, tags));
        }
        Ok(mapping)
    }

    /// Parse a mapping from a YAML document (`post: [tag, ...]`)
    pub fn from_yaml_str(yaml: &str) -> MappingResult<Self> {
        let raw: RawEntries = serde_yaml::from_str(yaml)?;
        Self::new(raw.0)
    }

    /// Parse a mapping from a JSON object (`{"post": ["tag", ...]}`)
    pub fn from_json_str(json: &str) -> MappingResult<Self> {
        let raw: RawEntries = serde_json::from_str(json)?;
        Self::new(raw.0)
    }

    /// Load a mapping file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> MappingResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(MappingError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serialize as a pretty JSON object in declaration order
    pub fn to_json_string(&self) -> MappingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Tags of a post, if the post is known
    pub fn tags(&self, post: &PostId) -> Option<&[String]> {
        self.index
            .get(post)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Whether `post` carries exactly `tag`
    ///
    /// Plain string equality: no case folding, trimming or partial matches.
    pub fn has_tag(&self, post: &PostId, tag: &str) -> bool {
        self.tags(post)
            .map(|tags| tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    /// Iterate over posts and their tags in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&PostId, &[String])> {
        self.entries.iter().map(|(p, t)| (p, t.as_slice()))
    }

    /// Iterate over post identifiers in declaration order
    pub fn posts(&self) -> impl Iterator<Item = &PostId> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unique tags with their post counts, most used first
    ///
    /// Ties are ordered alphabetically so the output is stable.
    pub fn tag_counts(&self) -> Vec<TagCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, tags) in &self.entries {
            let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
            for tag in tags {
                if !seen.contains(&tag.as_str()) {
                    seen.push(tag);
                    *counts.entry(tag).or_default() += 1;
                }
            }
        }

        let mut result: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        // BTreeMap already yields tags alphabetically; stable sort keeps that for ties
        result.sort_by(|a, b| b.count.cmp(&a.count));
        result
    }
}

impl Serialize for TagMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (post, tags) in &self.entries {
            map.serialize_entry(post, tags)?;
        }
        map.end()
    }
}

/// Map entries as they appear in the source document
///
/// Deserialized through a visitor so duplicate keys and key order survive
/// until `TagMapping::new` validates them.
struct RawEntries(Vec<(PostId, Vec<String>)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of post identifiers to tag lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((post, tags)) = access.next_entry::<PostId, Vec<String>>()? {
                    entries.push((post, tags));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
