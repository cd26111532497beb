//! Tag query parameter extraction
//!
//! Mirrors `URLSearchParams.get("tag")` as seen by the page script: the first
//! pair wins, `+` decodes to a space, percent escapes are decoded, and an
//! empty value counts as no tag at all.

use thiserror::Error;
use url::Url;

/// Name of the query parameter carrying the requested tag
pub const DEFAULT_PARAM: &str = "tag";

/// Base used to resolve relative page URLs such as `articles.html?tag=x`
const RELATIVE_BASE: &str = "http://localhost/";

/// Errors that can occur while reading a page URL
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The tag requested by the page URL, if any
///
/// Extracted once and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    tag: Option<String>,
}

impl TagQuery {
    /// A query that requests `tag`
    pub fn with_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            tag: (!tag.is_empty()).then_some(tag),
        }
    }

    /// A query without a tag
    pub fn none() -> Self {
        Self::default()
    }

    /// Read the `tag` parameter from a page URL
    pub fn from_url(page_url: &str) -> Result<Self, QueryError> {
        Self::from_url_with_param(page_url, DEFAULT_PARAM)
    }

    /// Read a custom parameter from a page URL
    ///
    /// Accepts absolute URLs, relative URLs and bare query strings.
    pub fn from_url_with_param(page_url: &str, param: &str) -> Result<Self, QueryError> {
        let url = parse_page_url(page_url)?;
        let tag = url
            .query_pairs()
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
        Ok(Self { tag })
    }

    /// The requested tag
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
    }
}

fn parse_page_url(page_url: &str) -> Result<Url, QueryError> {
    let invalid = |source| QueryError::InvalidUrl {
        url: page_url.to_string(),
        source,
    };
    match Url::parse(page_url) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(page_url))
            .map_err(invalid),
        Err(e) => Err(invalid(e)),
    }
}

/// Link to `page` filtered by `tag`, e.g. `articles.html?tag=venomous+snakes`
pub fn tag_href(page: &str, tag: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(DEFAULT_PARAM, tag)
        .finish();
    format!("{}?{}", page, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encoded_tag() {
        let q = TagQuery::from_url("https://blog.example/articles.html?tag=venomous%20snakes").unwrap();
        assert_eq!(q.tag(), Some("venomous snakes"));
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let q = TagQuery::from_url("articles.html?tag=black+mamba").unwrap();
        assert_eq!(q.tag(), Some("black mamba"));
    }

    #[test]
    fn test_bare_query_string() {
        let q = TagQuery::from_url("?tag=reptiles").unwrap();
        assert_eq!(q.tag(), Some("reptiles"));
    }

    #[test]
    fn test_missing_param() {
        let q = TagQuery::from_url("/articles.html?page=2").unwrap();
        assert!(q.is_empty());
        let q = TagQuery::from_url("/articles.html").unwrap();
        assert_eq!(q.tag(), None);
    }

    #[test]
    fn test_empty_value_is_no_tag() {
        assert!(TagQuery::from_url("/articles.html?tag=").unwrap().is_empty());
        assert!(TagQuery::with_tag("").is_empty());
    }

    #[test]
    fn test_first_pair_wins() {
        let q = TagQuery::from_url("/a.html?tag=one&tag=two").unwrap();
        assert_eq!(q.tag(), Some("one"));
    }

    #[test]
    fn test_value_is_not_trimmed_or_folded() {
        let q = TagQuery::from_url("/a.html?tag=%20Reptiles").unwrap();
        assert_eq!(q.tag(), Some(" Reptiles"));
    }

    #[test]
    fn test_custom_param() {
        let q = TagQuery::from_url_with_param("/a.html?topic=sharks&tag=x", "topic").unwrap();
        assert_eq!(q.tag(), Some("sharks"));
    }

    #[test]
    fn test_invalid_url() {
        let err = TagQuery::from_url("http://[::1").unwrap_err();
        assert!(matches!(err, QueryError::InvalidUrl { .. }));
    }

    #[test]
    fn test_tag_href_round_trips() {
        let href = tag_href("articles.html", "venomous snakes & co");
        assert_eq!(href, "articles.html?tag=venomous+snakes+%26+co");
        let q = TagQuery::from_url(&href).unwrap();
        assert_eq!(q.tag(), Some("venomous snakes & co"));
    }
}
