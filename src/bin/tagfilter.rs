//! Tagfilter CLI: apply tag filters to blog pages and manage tag mappings.
//!
//! Usage:
//!   tagfilter apply --url <page url> --page <file> [--mapping file] [--out file]
//!   tagfilter check --mapping <file>
//!   tagfilter build-mapping --posts <dir> [--out file]
//!   tagfilter tags [--mapping file] [--page articles.html]
//!   tagfilter script [--mapping file] [--out file]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tagfilter::{
    mapping_from_posts, render_script, scan_posts, tag_href, FilterConfig, HtmlListing, TagFilter,
    TagFilterError, TagFilterResult, TagMapping,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "tagfilter",
    version,
    about = "Tag-based filtering of static blog article listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the article listing of a rendered page by the URL's tag
    Apply {
        /// Page URL carrying the tag parameter (e.g. "articles.html?tag=reptiles")
        #[arg(long)]
        url: String,
        /// Rendered HTML page containing the listing
        #[arg(long)]
        page: PathBuf,
        /// Tag mapping file (.yaml, .yml or .json)
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Write the filtered page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate a tag mapping
    Check {
        /// Tag mapping file (.yaml, .yml or .json)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
    /// Build a tag mapping from post front matter
    BuildMapping {
        /// Directory containing markdown posts
        #[arg(long)]
        posts: PathBuf,
        /// Write the mapping here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List tags by number of posts, with filter links
    Tags {
        /// Tag mapping file (.yaml, .yml or .json)
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Listing page the links point at
        #[arg(long, default_value = "articles.html")]
        page: String,
    },
    /// Emit the client-side filter script
    Script {
        /// Tag mapping file (.yaml, .yml or .json)
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Write the script here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the mapping named on the command line, falling back to the config
fn load_mapping(arg: Option<PathBuf>, config: &FilterConfig) -> Result<TagMapping, String> {
    let path = arg
        .or_else(|| config.mapping.clone())
        .ok_or_else(|| "no tag mapping given (use --mapping or set `mapping` in the config)".to_string())?;
    TagMapping::load(&path).map_err(|e| format!("Failed to load mapping {}: {}", path.display(), e))
}

fn write_output(out: Option<&Path>, content: &str) -> TagFilterResult<()> {
    match out {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}

fn cmd_apply(
    config: FilterConfig,
    url: &str,
    page: &Path,
    mapping: Option<PathBuf>,
    out: Option<&Path>,
) -> i32 {
    let mapping = match load_mapping(mapping, &config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let source = match std::fs::read_to_string(page) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", page.display(), e);
            return 1;
        }
    };

    let mut listing = HtmlListing::parse(source, &config.listing_class, config.locator);
    let filter = TagFilter::new(mapping, config);
    let result = filter
        .run(url, &mut listing)
        .map_err(TagFilterError::from)
        .and_then(|_| write_output(out, &listing.render()));
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_check(config: &FilterConfig, mapping: Option<PathBuf>) -> i32 {
    match load_mapping(mapping, config) {
        Ok(mapping) => {
            println!(
                "Mapping OK: {} posts, {} distinct tags",
                mapping.len(),
                mapping.tag_counts().len()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_build_mapping(config: &FilterConfig, posts: &Path, out: Option<&Path>) -> i32 {
    let result = scan_posts(posts, &config.posts_prefix)
        .map_err(TagFilterError::from)
        .and_then(|metas| Ok(mapping_from_posts(&metas)?))
        .and_then(|mapping| Ok(mapping.to_json_string()?))
        .and_then(|json| write_output(out, &format!("{}\n", json)));
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_tags(config: &FilterConfig, mapping: Option<PathBuf>, page: &str) -> i32 {
    let mapping = match load_mapping(mapping, config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let counts = mapping.tag_counts();
    if counts.is_empty() {
        println!("No tags defined.");
        return 0;
    }
    let width = counts.iter().map(|c| c.tag.len()).max().unwrap_or(3).max(3);
    println!("{:<width$}  {:>5}  LINK", "TAG", "POSTS", width = width);
    println!("{}", "-".repeat(width + 13));
    for count in counts {
        println!(
            "{:<width$}  {:>5}  {}",
            count.tag,
            count.count,
            tag_href(page, &count.tag),
            width = width
        );
    }
    0
}

fn cmd_script(config: &FilterConfig, mapping: Option<PathBuf>, out: Option<&Path>) -> i32 {
    let mapping = match load_mapping(mapping, config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let result = render_script(&mapping, config)
        .map_err(TagFilterError::from)
        .and_then(|script| write_output(out, &script));
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match FilterConfig::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Apply {
            url,
            page,
            mapping,
            out,
        } => cmd_apply(config, &url, &page, mapping, out.as_deref()),
        Commands::Check { mapping } => cmd_check(&config, mapping),
        Commands::BuildMapping { posts, out } => cmd_build_mapping(&config, &posts, out.as_deref()),
        Commands::Tags { mapping, page } => cmd_tags(&config, mapping, &page),
        Commands::Script { mapping, out } => cmd_script(&config, mapping, out.as_deref()),
    };
    std::process::exit(code);
}
