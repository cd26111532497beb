//! Post identifiers

use serde::{Deserialize, Serialize};

/// Identifier of a post in the tag mapping
///
/// Serializes as a plain string, usually the post's relative URL
/// (e.g. `posts/black_mamba.html`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Create a PostId from a relative URL or filename
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment of the identifier
    ///
    /// Listing entries carry this as their element id.
    pub fn filename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PostId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_segment() {
        assert_eq!(PostId::new("posts/black_mamba.html").filename(), "black_mamba.html");
        assert_eq!(PostId::new("black_mamba.html").filename(), "black_mamba.html");
        assert_eq!(PostId::new("a/b/komodo_dragon.htm").filename(), "komodo_dragon.htm");
    }

    #[test]
    fn serializes_as_string() {
        let id = PostId::new("posts/inland_taipan.html");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"posts/inland_taipan.html\"");
        let back: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
