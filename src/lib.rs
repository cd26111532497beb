//! Tagfilter: tag-based filtering of static blog article listings
//!
//! A page listing articles is narrowed down to the posts carrying the tag
//! named in its URL (`articles.html?tag=venomous%20snakes`). Posts without
//! the tag have their listing entry hidden; nothing is ever removed or shown
//! again.
//!
//! # Core Concepts
//!
//! - **TagMapping**: immutable table of post identifier → tags
//! - **TagQuery**: the tag requested by the page URL, if any
//! - **ListingView**: where visibility changes land (in memory or an HTML page)
//!
//! # Example
//!
//! ```
//! use tagfilter::{filter_listing, MemoryListing, PostId, TagMapping, TagQuery};
//!
//! let mapping = TagMapping::new(vec![
//!     ("posts/black_mamba.html", vec!["venomous snakes", "reptiles"]),
//!     ("posts/giant_pacific_octopus.html", vec!["marine predators"]),
//! ])
//! .unwrap();
//! let mut listing = MemoryListing::with_entries(mapping.posts().cloned());
//!
//! let query = TagQuery::from_url("articles.html?tag=venomous%20snakes").unwrap();
//! filter_listing(&mapping, &query, &mut listing);
//!
//! assert_eq!(listing.is_visible(&PostId::new("posts/black_mamba.html")), Some(true));
//! assert_eq!(listing.is_visible(&PostId::new("posts/giant_pacific_octopus.html")), Some(false));
//! ```

pub mod config;
mod error;
pub mod filter;
pub mod mapping;
pub mod posts;
pub mod query;
pub mod script;
pub mod view;

pub use config::{ConfigError, FilterConfig};
pub use error::{TagFilterError, TagFilterResult};
pub use filter::{filter_listing, FilterReport, TagFilter};
pub use mapping::{MappingError, PostId, TagCount, TagMapping};
pub use posts::{mapping_from_posts, scan_posts, PostError, PostMeta};
pub use query::{tag_href, QueryError, TagQuery};
pub use script::{render_script, ScriptError};
pub use view::{EntryLocator, HtmlListing, ListingView, MemoryListing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
