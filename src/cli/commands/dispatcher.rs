//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, load_system_env, proxy_from_env, SiteConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Settings shared by every command: the site config with CLI overrides
/// applied, plus the proxy resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: SiteConfig,
    pub proxy: Option<String>,
    site_root: PathBuf,
}

impl Settings {
    /// Cache directory, resolved against the site root when relative.
    pub fn cache_dir(&self) -> PathBuf {
        self.site_root.join(&self.config.gist_cache_dir)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    site_root: PathBuf,
    env: HashMap<String, String>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given site root, reading proxy
    /// settings from the process environment.
    pub fn new(site_root: PathBuf) -> Self {
        Self::with_env(site_root, load_system_env())
    }

    /// Create a dispatcher with an explicit environment map.
    pub fn with_env(site_root: PathBuf, env: HashMap<String, String>) -> Self {
        Self { site_root, env }
    }

    /// Get the site root path.
    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Load the site config and apply command-line overrides.
    pub fn settings(&self, cli: &Cli) -> Result<Settings> {
        let mut config = load_config(&self.site_root, cli.config.as_deref())?;

        if let Some(dir) = &cli.cache_dir {
            config.gist_cache_dir = dir.clone();
        }
        if let Some(base) = &cli.api_base {
            config.gist_api_base = base.clone();
        }

        let proxy = proxy_from_env(&self.env);
        if let Some(proxy) = &proxy {
            tracing::debug!("Using proxy {}", proxy);
        }

        Ok(Settings {
            config,
            proxy,
            site_root: self.site_root.clone(),
        })
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.settings(cli)?;

        match &cli.command {
            Commands::Render(args) => {
                let cmd = super::render::RenderCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Commands::Tag(args) => {
                let cmd = super::tag::TagCommand::new(settings, args.clone());
                cmd.execute(ui)
            }
            Commands::Cache(args) => {
                let cmd = super::cache::CacheCommand::new(settings.cache_dir(), args.clone());
                cmd.execute(ui)
            }
        }
    }
}
