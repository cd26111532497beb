//! Listing views: where filter decisions land
//!
//! The filter never touches a document directly. It talks to a
//! [`ListingView`], which knows how to find the entry for a post and how to
//! change its visibility.

mod html;
mod memory;

pub use html::{HtmlListing, DEFAULT_LISTING_CLASS};
pub use memory::MemoryListing;

use crate::mapping::PostId;
use serde::{Deserialize, Serialize};

/// Visibility control over the entries of an article listing
pub trait ListingView {
    /// Change the visibility of the entry for `post`
    ///
    /// Returns `false` when the listing has no entry for the post. That is a
    /// no-op, not an error.
    fn set_visible(&mut self, post: &PostId, visible: bool) -> bool;
}

impl<V: ListingView + ?Sized> ListingView for &mut V {
    fn set_visible(&mut self, post: &PostId, visible: bool) -> bool {
        (**self).set_visible(post, visible)
    }
}

/// How a listing entry is matched to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryLocator {
    /// Element whose `id` equals the post filename
    #[default]
    ElementId,
    /// List item whose anchor path contains the post URL
    AnchorPath,
}

impl std::fmt::Display for EntryLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementId => write!(f, "element_id"),
            Self::AnchorPath => write!(f, "anchor_path"),
        }
    }
}
