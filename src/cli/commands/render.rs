//! Render command implementation.
//!
//! Resolves one snippet through the cache and prints it as HTML.

use crate::cache::CacheStore;
use crate::cli::args::RenderArgs;
use crate::highlight::PlainHighlighter;
use crate::remote::GistClient;
use crate::render::{html, SnippetReference, SnippetResolver};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Settings};

/// The render command implementation.
pub struct RenderCommand {
    settings: Settings,
    args: RenderArgs,
}

impl RenderCommand {
    /// Create a new render command.
    pub fn new(settings: Settings, args: RenderArgs) -> Self {
        Self { settings, args }
    }

    fn revalidate(&self) -> bool {
        self.args.check_update || self.settings.config.gist_check_update
    }
}

impl Command for RenderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let store = CacheStore::new(self.settings.cache_dir());
        let client = GistClient::new(
            self.settings
                .config
                .fetch_config(self.settings.proxy.clone()),
        )?;
        let highlighter = PlainHighlighter;
        let resolver = SnippetResolver::new(&store, &client, &highlighter);

        let reference = SnippetReference::new(
            &self.args.collection_id,
            self.args.selector.clone().unwrap_or_default(),
        );
        let options = self.args.tag.options(self.revalidate());

        match resolver.resolve(&reference, options) {
            Ok(snippet) => {
                tracing::debug!("Resolved {} ({:?})", reference.collection_id, snippet.origin);
                if self.args.body_only {
                    ui.emit(&snippet.html);
                } else {
                    ui.emit(&html::figure(&snippet));
                }
                Ok(CommandResult::success())
            }
            Err(e) => {
                tracing::error!("{}: {}", e, e.source);
                ui.error(&format!("{}: {}", e, e.source));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
