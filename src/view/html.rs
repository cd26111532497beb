//! Listing view over a rendered HTML page
//!
//! The page is parsed once with `scraper` to index its listing entries. Hiding
//! an entry does not rewrite the markup: `render` returns the original text
//! with a single `<style data-tag-filter>` element holding a `display: none`
//! rule per hidden entry. Each rule uses a structural selector
//! (`:root > body:nth-child(2) > ...`) that matches exactly that element, so
//! entries without an id can still be targeted.
//!
//! Selectors are resolved against the page with the style element already in
//! place: a `<style>` that lands in `<body>` shifts its later siblings.

use super::{EntryLocator, ListingView};
use crate::mapping::PostId;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Listing container class used by the blog templates
pub const DEFAULT_LISTING_CLASS: &str = "articles";

const HREF_BASE: &str = "http://localhost/";

const STYLE_OPEN: &str = "<style data-tag-filter>\n";
const STYLE_CLOSE: &str = "</style>\n";

#[derive(Debug, Clone)]
struct ListingEntry {
    /// Element id (id locator) or anchor path (anchor locator)
    key: String,
    /// Structural selector matching only this element
    selector: String,
}

/// An article listing inside an HTML page
#[derive(Debug, Clone)]
pub struct HtmlListing {
    source: String,
    listing_class: String,
    locator: EntryLocator,
    entries: Vec<ListingEntry>,
    hidden: Vec<usize>,
}

impl HtmlListing {
    /// Index the listing entries of `source`
    ///
    /// Entries are looked up under the first element carrying
    /// `listing_class`. Without such an element the whole page is searched.
    pub fn parse(source: impl Into<String>, listing_class: &str, locator: EntryLocator) -> Self {
        let source = source.into();
        let document = Html::parse_document(&source);
        let root = document.root_element();

        let container = std::iter::once(root)
            .chain(root.descendants().skip(1).filter_map(ElementRef::wrap))
            .find(|el| el.value().classes().any(|c| c == listing_class));
        if container.is_none() {
            debug!(class = listing_class, "listing container not found, searching whole page");
        }
        let scope = container.unwrap_or(root);

        let entries = match locator {
            EntryLocator::ElementId => index_by_id(scope),
            EntryLocator::AnchorPath => index_by_anchor(scope),
        };
        debug!(entries = entries.len(), %locator, "indexed listing entries");

        Self {
            source,
            listing_class: listing_class.to_string(),
            locator,
            entries,
            hidden: Vec::new(),
        }
    }

    /// Number of entries found in the listing
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the entry for `post` is hidden, `None` if there is no entry
    pub fn is_hidden(&self, post: &PostId) -> Option<bool> {
        self.find(post).map(|i| self.hidden.contains(&i))
    }

    /// Selectors of the hidden entries in the rendered page, in the order
    /// they were hidden
    pub fn hidden_selectors(&self) -> Vec<String> {
        if self.hidden.is_empty() {
            return Vec::new();
        }
        let shell = splice(
            &self.source,
            injection_point(&self.source),
            &format!("{}{}", STYLE_OPEN, STYLE_CLOSE),
        );
        // Style content is raw text, so an empty element parses to the same tree
        let rendered = Self::parse(shell, &self.listing_class, self.locator);
        self.hidden
            .iter()
            .map(|&i| {
                let entry = &self.entries[i];
                rendered
                    .entries
                    .get(i)
                    .filter(|e| e.key == entry.key)
                    .or_else(|| rendered.entries.iter().find(|e| e.key == entry.key))
                    .map(|e| e.selector.clone())
                    .unwrap_or_else(|| {
                        warn!(key = %entry.key, "entry not found in rendered page");
                        entry.selector.clone()
                    })
            })
            .collect()
    }

    /// The `<style>` element hiding the filtered entries, if any were hidden
    pub fn stylesheet(&self) -> Option<String> {
        if self.hidden.is_empty() {
            return None;
        }
        let selectors = self.hidden_selectors().join(",\n");
        Some(format!(
            "{}{} {{ display: none !important; }}\n{}",
            STYLE_OPEN, selectors, STYLE_CLOSE
        ))
    }

    /// The page with the hiding stylesheet injected
    ///
    /// Without hidden entries the original text is returned unchanged.
    pub fn render(&self) -> String {
        let Some(style) = self.stylesheet() else {
            return self.source.clone();
        };
        splice(&self.source, injection_point(&self.source), &style)
    }

    fn find(&self, post: &PostId) -> Option<usize> {
        match self.locator {
            EntryLocator::ElementId => {
                let filename = post.filename();
                self.entries.iter().position(|e| e.key == filename)
            }
            EntryLocator::AnchorPath => self
                .entries
                .iter()
                .position(|e| e.key.contains(post.as_str())),
        }
    }
}

impl ListingView for HtmlListing {
    fn set_visible(&mut self, post: &PostId, visible: bool) -> bool {
        let Some(index) = self.find(post) else {
            return false;
        };
        // Entries are never un-hidden; showing is the page's default state
        if !visible && !self.hidden.contains(&index) {
            self.hidden.push(index);
        }
        true
    }
}

fn index_by_id(scope: ElementRef<'_>) -> Vec<ListingEntry> {
    let mut entries: Vec<ListingEntry> = Vec::new();
    for el in scope.descendants().skip(1).filter_map(ElementRef::wrap) {
        if let Some(id) = el.value().id() {
            // First element wins, as with getElementById
            if entries.iter().all(|e| e.key != id) {
                entries.push(ListingEntry {
                    key: id.to_string(),
                    selector: structural_selector(el),
                });
            }
        }
    }
    entries
}

fn index_by_anchor(scope: ElementRef<'_>) -> Vec<ListingEntry> {
    let (Ok(items), Ok(anchors)) = (Selector::parse("li"), Selector::parse("a[href]")) else {
        return Vec::new();
    };
    scope
        .select(&items)
        .filter_map(|item| {
            let href = item.select(&anchors).next()?.value().attr("href")?;
            Some(ListingEntry {
                key: href_path(href),
                selector: structural_selector(item),
            })
        })
        .collect()
}

/// Path component of an anchor's href, as `HTMLAnchorElement.pathname` reports it
fn href_path(href: &str) -> String {
    Url::parse(HREF_BASE)
        .and_then(|base| base.join(href))
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| href.to_string())
}

fn structural_selector(el: ElementRef<'_>) -> String {
    let mut segments = Vec::new();
    let mut current = Some(el);
    while let Some(node) = current {
        let parent = node.parent().and_then(ElementRef::wrap);
        if parent.is_none() {
            segments.push(":root".to_string());
            break;
        }
        let position = node
            .prev_siblings()
            .filter(|sibling| sibling.value().is_element())
            .count()
            + 1;
        segments.push(format!("{}:nth-child({})", node.value().name(), position));
        current = parent;
    }
    segments.reverse();
    segments.join(" > ")
}

fn splice(source: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(source.len() + insert.len());
    out.push_str(&source[..at]);
    out.push_str(insert);
    out.push_str(&source[at..]);
    out
}

/// Byte offset where the stylesheet goes: before `</head>`, after the
/// doctype, or at the very start.
fn injection_point(source: &str) -> usize {
    let lower = source.to_ascii_lowercase();
    if let Some(pos) = lower.find("</head>") {
        return pos;
    }
    if lower
        .trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with("<!doctype")
    {
        if let Some(end) = lower.find('>') {
            return end + 1;
        }
    }
    0
}
