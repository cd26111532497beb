//! End-to-end: posts on disk → tag mapping → filtered page and script

mod common;

use common::{articles_page, post};
use std::fs;
use tagfilter::{
    mapping_from_posts, render_script, scan_posts, tag_href, EntryLocator, FilterConfig,
    HtmlListing, TagFilter, TagMapping, TagQuery,
};

fn write_post(dir: &std::path::Path, name: &str, front: &str) {
    fs::write(dir.join(name), format!("---\n{}\n---\n\nBody of {}\n", front, name)).unwrap();
}

fn wildlife_posts() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_post(
        dir.path(),
        "black_mamba.md",
        "title: The Black Mamba\ndate: 2024-03-01\ntags: venomous snakes, black mamba, reptiles",
    );
    write_post(
        dir.path(),
        "giant_pacific_octopus.md",
        "title: The Giant Pacific Octopus\ndate: 2023-12-05\ntags: [marine predators, giant pacific octopus]",
    );
    write_post(
        dir.path(),
        "inland_taipan.md",
        "title: Inland Taipan\ndate: 2023-11-11\ntags:\n  - venomous snakes\n  - reptiles",
    );
    write_post(
        dir.path(),
        "unfinished.md",
        "title: Work in progress\ndraft: true\ntags: reptiles",
    );
    dir
}

#[test]
fn mapping_built_from_posts_drives_the_filter() {
    let dir = wildlife_posts();
    let posts = scan_posts(dir.path(), "posts").unwrap();
    assert_eq!(posts.len(), 4);

    let mapping = mapping_from_posts(&posts).unwrap();
    let ids: Vec<_> = mapping.posts().map(|p| p.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "posts/black_mamba.html",
            "posts/giant_pacific_octopus.html",
            "posts/inland_taipan.html"
        ]
    );

    let filter = TagFilter::new(mapping, FilterConfig::default());
    let mut listing = HtmlListing::parse(articles_page(), "articles", EntryLocator::ElementId);
    let report = filter
        .run("articles.html?tag=venomous+snakes", &mut listing)
        .unwrap();

    assert_eq!(report.hidden, vec![post("posts/giant_pacific_octopus.html")]);
    // Posts on the page but not in the mapping are left alone
    assert_eq!(listing.is_hidden(&post("posts/komodo_dragon.htm")), Some(false));
    assert!(listing.render().contains("<style data-tag-filter>"));
}

#[test]
fn mapping_json_reloads_identically() {
    let dir = wildlife_posts();
    let mapping = mapping_from_posts(&scan_posts(dir.path(), "posts").unwrap()).unwrap();

    let path = dir.path().join("tags.json");
    fs::write(&path, mapping.to_json_string().unwrap()).unwrap();
    assert_eq!(TagMapping::load(&path).unwrap(), mapping);
}

#[test]
fn tag_links_lead_back_to_the_filter() {
    let dir = wildlife_posts();
    let mapping = mapping_from_posts(&scan_posts(dir.path(), "posts").unwrap()).unwrap();

    let top = &mapping.tag_counts()[0];
    assert_eq!(top.count, 2);
    let href = tag_href("articles.html", &top.tag);
    assert_eq!(TagQuery::from_url(&href).unwrap().tag(), Some(top.tag.as_str()));
}

#[test]
fn script_carries_built_mapping() {
    let dir = wildlife_posts();
    let mapping = mapping_from_posts(&scan_posts(dir.path(), "posts").unwrap()).unwrap();
    let script = render_script(&mapping, &FilterConfig::default()).unwrap();

    assert!(script.contains("\"posts/inland_taipan.html\""));
    assert!(script.contains("\"giant pacific octopus\""));
    assert!(!script.contains("unfinished"));
}
