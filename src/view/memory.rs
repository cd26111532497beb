//! In-memory listing view

use super::ListingView;
use crate::mapping::PostId;
use std::collections::HashMap;

/// A listing held in memory, one entry per post
///
/// Entries start visible, matching a freshly rendered page.
#[derive(Debug, Clone, Default)]
pub struct MemoryListing {
    order: Vec<PostId>,
    visible: HashMap<PostId, bool>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing with a visible entry for each post
    pub fn with_entries<I, P>(posts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PostId>,
    {
        let mut listing = Self::new();
        for post in posts {
            listing.add_entry(post);
        }
        listing
    }

    /// Add a visible entry; adding an existing post is ignored
    pub fn add_entry(&mut self, post: impl Into<PostId>) {
        let post = post.into();
        if !self.visible.contains_key(&post) {
            self.visible.insert(post.clone(), true);
            self.order.push(post);
        }
    }

    /// Visibility of a post's entry, `None` if there is no entry
    pub fn is_visible(&self, post: &PostId) -> Option<bool> {
        self.visible.get(post).copied()
    }

    /// Hidden entries in listing order
    pub fn hidden(&self) -> Vec<&PostId> {
        self.order
            .iter()
            .filter(|p| self.visible.get(*p) == Some(&false))
            .collect()
    }

    /// Visible entries in listing order
    pub fn visible(&self) -> Vec<&PostId> {
        self.order
            .iter()
            .filter(|p| self.visible.get(*p) == Some(&true))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl ListingView for MemoryListing {
    fn set_visible(&mut self, post: &PostId, visible: bool) -> bool {
        match self.visible.get_mut(post) {
            Some(state) => {
                // Hidden entries stay hidden; there is no un-hide
                if !visible {
                    *state = false;
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_start_visible() {
        let listing = MemoryListing::with_entries(["a.html", "b.html"]);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.is_visible(&PostId::new("a.html")), Some(true));
        assert!(listing.hidden().is_empty());
    }

    #[test]
    fn test_set_visible_unknown_entry() {
        let mut listing = MemoryListing::with_entries(["a.html"]);
        assert!(!listing.set_visible(&PostId::new("zzz.html"), false));
        assert_eq!(listing.is_visible(&PostId::new("zzz.html")), None);
    }

    #[test]
    fn test_hidden_entry_is_not_shown_again() {
        let mut listing = MemoryListing::with_entries(["a.html"]);
        let post = PostId::new("a.html");
        assert!(listing.set_visible(&post, false));
        assert!(listing.set_visible(&post, true));
        assert_eq!(listing.is_visible(&post), Some(false));
    }

    #[test]
    fn test_hidden_keeps_listing_order() {
        let mut listing = MemoryListing::with_entries(["c.html", "a.html", "b.html"]);
        listing.set_visible(&PostId::new("b.html"), false);
        listing.set_visible(&PostId::new("c.html"), false);
        let hidden: Vec<_> = listing.hidden().into_iter().map(|p| p.as_str()).collect();
        assert_eq!(hidden, vec!["c.html", "b.html"]);
        let visible: Vec<_> = listing.visible().into_iter().map(|p| p.as_str()).collect();
        assert_eq!(visible, vec!["a.html"]);
    }
}
