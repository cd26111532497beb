//! The tag filter
//!
//! One pass over the mapping: every post whose own tag list lacks the
//! requested tag gets its listing entry hidden. Posts carrying the tag are
//! left alone, so they keep whatever visibility the page gave them. Nothing
//! is ever shown again, which makes repeated runs with the same tag
//! idempotent.

use crate::config::FilterConfig;
use crate::mapping::{PostId, TagMapping};
use crate::query::{QueryError, TagQuery};
use crate::view::ListingView;
use serde::Serialize;
use tracing::{debug, info};

/// What a filter run did
///
/// Purely informational; the view carries the actual state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// The tag filtered by, `None` when the page had no tag
    pub tag: Option<String>,
    /// Posts whose entries were hidden
    pub hidden: Vec<PostId>,
    /// Posts carrying the tag
    pub visible: Vec<PostId>,
    /// Posts without a tag match that had no entry in the listing
    pub missing: Vec<PostId>,
}

impl FilterReport {
    /// Whether the run was a no-op because no tag was requested
    pub fn skipped(&self) -> bool {
        self.tag.is_none()
    }
}

/// Hide the listing entries of posts that do not carry the query's tag
pub fn filter_listing<V>(mapping: &TagMapping, query: &TagQuery, view: &mut V) -> FilterReport
where
    V: ListingView + ?Sized,
{
    let Some(tag) = query.tag() else {
        return FilterReport::default();
    };

    let mut report = FilterReport {
        tag: Some(tag.to_string()),
        ..Default::default()
    };

    for (post, tags) in mapping.iter() {
        if tags.iter().any(|t| t == tag) {
            debug!(%post, tag, "post carries tag");
            report.visible.push(post.clone());
            continue;
        }
        if view.set_visible(post, false) {
            debug!(%post, tag, "hiding listing entry");
            report.hidden.push(post.clone());
        } else {
            debug!(%post, "no listing entry for post");
            report.missing.push(post.clone());
        }
    }

    report
}

/// A mapping and configuration, ready to run once per page load
#[derive(Debug, Clone)]
pub struct TagFilter {
    mapping: TagMapping,
    config: FilterConfig,
}

impl TagFilter {
    pub fn new(mapping: TagMapping, config: FilterConfig) -> Self {
        Self { mapping, config }
    }

    pub fn mapping(&self) -> &TagMapping {
        &self.mapping
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Read the tag from `page_url` and filter `view` by it
    pub fn run<V>(&self, page_url: &str, view: &mut V) -> Result<FilterReport, QueryError>
    where
        V: ListingView + ?Sized,
    {
        let query = TagQuery::from_url_with_param(page_url, &self.config.param)?;
        match query.tag() {
            Some(tag) => info!(tag, "filtering listing by tag"),
            None => info!(param = %self.config.param, "tag parameter not found in the URL"),
        }
        let report = filter_listing(&self.mapping, &query, view);
        if !report.skipped() {
            info!(
                hidden = report.hidden.len(),
                visible = report.visible.len(),
                missing = report.missing.len(),
                "tag filter applied"
            );
        }
        Ok(report)
    }
}
