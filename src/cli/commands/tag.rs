//! Tag command implementation.
//!
//! Renders a raw tag directive exactly as a site build would: failures
//! become the inline error marker and the command still succeeds.

use crate::cache::CacheStore;
use crate::cli::args::TagArgs;
use crate::highlight::PlainHighlighter;
use crate::remote::GistClient;
use crate::render::{SnippetResolver, TagRenderer};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Settings};

/// The tag command implementation.
pub struct TagCommand {
    settings: Settings,
    args: TagArgs,
}

impl TagCommand {
    /// Create a new tag command.
    pub fn new(settings: Settings, args: TagArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for TagCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let store = CacheStore::new(self.settings.cache_dir());
        let client = GistClient::new(
            self.settings
                .config
                .fetch_config(self.settings.proxy.clone()),
        )?;
        let highlighter = PlainHighlighter;
        let renderer = TagRenderer::new(
            SnippetResolver::new(&store, &client, &highlighter),
            self.settings.config.gist_check_update,
        );

        let output = renderer.render(self.args.name, &self.args.directive());
        if !output.is_empty() {
            ui.emit(&output);
        }

        Ok(CommandResult::success())
    }
}
