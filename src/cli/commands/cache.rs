//! Cache command implementation.
//!
//! Provides `snipcache cache list`, `snipcache cache clear`, etc.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cache::{CacheKey, CacheStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List cached entries.
    List {
        /// Show detailed information.
        #[arg(long)]
        verbose: bool,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove the entry for one snippet reference.
    Remove {
        /// Remote collection id
        collection_id: String,
        /// File within the collection, as written in the tag
        selector: Option<String>,
    },
    /// Clear the cache.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Show cache statistics.
    Stats,
}

/// The cache command implementation.
pub struct CacheCommand {
    cache_dir: PathBuf,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(cache_dir: PathBuf, args: CacheArgs) -> Self {
        Self { cache_dir, args }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let store = CacheStore::new(&self.cache_dir);

        let exit_code = match &self.args.command {
            CacheSubcommand::List { verbose, json } => list_cache(&store, *verbose, *json, ui)?,
            CacheSubcommand::Remove {
                collection_id,
                selector,
            } => remove_entry(&store, collection_id, selector.as_deref(), ui)?,
            CacheSubcommand::Clear { force } => clear_cache(&store, *force, ui)?,
            CacheSubcommand::Stats => show_stats(&store, ui)?,
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn list_cache(
    store: &CacheStore,
    verbose: bool,
    json: bool,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let entries = store.list()?;

    if json {
        let output = serde_json::to_string_pretty(&entries)?;
        ui.emit(&output);
        return Ok(0);
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(0);
    }

    ui.message(&format!("{} cached entries:\n", entries.len()));

    for entry in entries {
        let cached = entry.cached_at.format("%Y-%m-%d %H:%M:%S");
        if verbose {
            ui.message(&format!("  {} ({})", entry.selector_resolved, entry.collection_id));
            ui.message(&format!("    Cached: {}", cached));
            if let Some(updated) = entry.updated_at {
                ui.message(&format!("    Updated upstream: {}", updated.to_rfc3339()));
            }
            if let Some(lang) = &entry.language {
                ui.message(&format!("    Language: {}", lang));
            }
            ui.message(&format!("    Size: {} bytes", entry.size_bytes()));
            ui.message(&format!("    Raw: {}", entry.raw_url));
            ui.message("");
        } else {
            ui.message(&format!(
                "  {} {} [{}]",
                entry.collection_id, entry.selector_resolved, cached
            ));
        }
    }

    Ok(0)
}

fn remove_entry(
    store: &CacheStore,
    collection_id: &str,
    selector: Option<&str>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let key = CacheKey::derive(collection_id, selector.unwrap_or_default());

    if store.remove(&key)? {
        ui.success(&format!("Removed {}", key));
        Ok(0)
    } else {
        ui.warning(&format!("No cache entry for {}", key));
        Ok(1)
    }
}

fn clear_cache(store: &CacheStore, force: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let entries = store.list()?;
    if entries.is_empty() {
        ui.message("Cache is already empty");
        return Ok(0);
    }

    let count = entries.len();
    if !force && ui.is_interactive() && !ui.confirm(&format!("Clear {} cached entries?", count), false)? {
        ui.message("Cancelled");
        return Ok(0);
    }

    let cleared = store.clear()?;
    ui.success(&format!("Cleared {} entries", cleared));

    Ok(0)
}

fn show_stats(store: &CacheStore, ui: &mut dyn UserInterface) -> Result<i32> {
    let entries = store.list()?;
    let total_size = store.total_size()?;
    let collections = entries
        .iter()
        .map(|e| e.collection_id.as_str())
        .collect::<std::collections::BTreeSet<_>>()
        .len();

    ui.message("Cache Statistics:\n");
    ui.message(&format!("  Total entries: {}", entries.len()));
    ui.message(&format!("  Collections: {}", collections));
    ui.message(&format!("  Total size: {} bytes", total_size));
    ui.message(&format!("  Location: {}", store.root().display()));

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::artifact::fixtures::artifact;
    use crate::cache::ArtifactStore;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, CacheStore) {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        (temp, store)
    }

    fn seed(store: &CacheStore, id: &str, selector: &str) {
        store.put(&CacheKey::derive(id, selector), &artifact(id, None)).unwrap();
    }

    #[test]
    fn list_empty_cache() {
        let (_temp, store) = setup_test_store();
        let mut ui = MockUI::new();

        assert_eq!(list_cache(&store, false, false, &mut ui).unwrap(), 0);
        assert!(ui.has_message("Cache is empty"));
    }

    #[test]
    fn list_with_entries() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "");
        seed(&store, "def", "a.rb");

        let mut ui = MockUI::new();
        list_cache(&store, false, false, &mut ui).unwrap();

        assert!(ui.has_message("2 cached entries"));
        assert!(ui.has_message("abc a.rb"));
    }

    #[test]
    fn list_json_is_primary_output() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "");

        let mut ui = MockUI::new();
        list_cache(&store, false, true, &mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(parsed[0]["collection_id"], "abc");
    }

    #[test]
    fn remove_existing_and_missing() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "a.rb");

        let mut ui = MockUI::new();
        assert_eq!(remove_entry(&store, "abc", Some("a.rb"), &mut ui).unwrap(), 0);
        assert!(ui.has_success("Removed"));
        assert_eq!(remove_entry(&store, "abc", Some("a.rb"), &mut ui).unwrap(), 1);
        assert!(ui.has_warning("No cache entry"));
    }

    #[test]
    fn clear_prompts_when_interactive() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "");

        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_confirm_response(false);
        clear_cache(&store, false, &mut ui).unwrap();

        assert!(ui.has_message("Cancelled"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn clear_force_skips_prompt() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "");
        seed(&store, "def", "");

        let mut ui = MockUI::new();
        ui.set_interactive(true);
        clear_cache(&store, true, &mut ui).unwrap();

        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_success("Cleared 2 entries"));
    }

    #[test]
    fn show_stats_with_entries() {
        let (_temp, store) = setup_test_store();
        seed(&store, "abc", "");
        seed(&store, "abc", "a.rb");

        let mut ui = MockUI::new();
        show_stats(&store, &mut ui).unwrap();

        assert!(ui.has_message("Total entries: 2"));
        assert!(ui.has_message("Collections: 1"));
    }
}
