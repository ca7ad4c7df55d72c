//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::cache::CacheArgs;
use crate::render::TagKind;

/// snipcache - fetch, format and cache remote code snippets.
#[derive(Debug, Parser)]
#[command(name = "snipcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to site config file (default: ./_config.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides gist_cache_dir)
    #[arg(long, global = true, env = "SNIPCACHE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Snippet API root (overrides gist_api_base)
    #[arg(long, global = true, env = "SNIPCACHE_API_BASE")]
    pub api_base: Option<String>,

    /// Only print primary output and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve one snippet and print it as HTML
    Render(RenderArgs),

    /// Render a raw tag directive the way a site build does
    Tag(TagArgs),

    /// Manage the snippet cache
    Cache(CacheArgs),
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Remote collection id
    pub collection_id: String,

    /// File within the collection (default: first file)
    pub selector: Option<String>,

    /// Cache policy, by tag name
    #[arg(long, value_enum, default_value_t = TagKind::Gist)]
    pub tag: TagKind,

    /// Check the remote for updates before using a cached copy
    #[arg(long)]
    pub check_update: bool,

    /// Print only the formatted snippet, without the figure wrapper
    #[arg(long)]
    pub body_only: bool,
}

/// Arguments for the `tag` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TagArgs {
    /// Tag name
    #[arg(value_enum)]
    pub name: TagKind,

    /// Directive text: `collection_id [selector]`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl TagArgs {
    /// Directive text as one string.
    pub fn directive(&self) -> String {
        self.text.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_selector() {
        let cli = Cli::parse_from(["snipcache", "render", "abc123", "a.rb", "--tag", "gistbust"]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.collection_id, "abc123");
                assert_eq!(args.selector.as_deref(), Some("a.rb"));
                assert_eq!(args.tag, TagKind::GistBust);
                assert!(!args.check_update);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn render_defaults_to_gist_tag() {
        let cli = Cli::parse_from(["snipcache", "render", "abc123"]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.tag, TagKind::Gist);
                assert!(args.selector.is_none());
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn parses_tag_directive() {
        let cli = Cli::parse_from(["snipcache", "tag", "gistnocache", "abc123", "fish_prompt.fish"]);
        match cli.command {
            Commands::Tag(args) => {
                assert_eq!(args.name, TagKind::GistNoCache);
                assert_eq!(args.directive(), "abc123 fish_prompt.fish");
            }
            _ => panic!("Expected Tag command"),
        }
    }

    #[test]
    fn global_flags() {
        let cli = Cli::parse_from([
            "snipcache",
            "--cache-dir",
            "/tmp/c",
            "--quiet",
            "cache",
            "stats",
        ]);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
        assert!(cli.quiet);
    }
}
