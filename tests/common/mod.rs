//! Shared fixtures for integration tests
//!
//! The fixtures mirror a small wildlife blog: five posts, a YAML tag
//! mapping and the rendered `articles.html` listing page.

#![allow(dead_code)]

use std::path::PathBuf;
use tagfilter::{PostId, TagMapping};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn wildlife_mapping() -> TagMapping {
    TagMapping::load(fixtures_dir().join("tags.yaml")).expect("fixture mapping loads")
}

pub fn articles_page() -> String {
    std::fs::read_to_string(fixtures_dir().join("articles.html")).expect("fixture page readable")
}

/// Same listing rendered as list items without ids
pub fn anchor_page() -> String {
    let items: String = wildlife_mapping()
        .posts()
        .map(|p| format!("<li><span>*</span><a href=\"/{}\">{}</a></li>\n", p, p.filename()))
        .collect();
    format!(
        "<html><head><title>Articles</title></head><body><ul class=\"articles\">\n{}</ul></body></html>",
        items
    )
}

pub fn post(id: &str) -> PostId {
    PostId::new(id)
}

pub const ALL_POSTS: [&str; 5] = [
    "posts/inland_taipan.html",
    "posts/giant_pacific_octopus.html",
    "posts/great_white_shark.html",
    "posts/komodo_dragon.htm",
    "posts/black_mamba.html",
];
