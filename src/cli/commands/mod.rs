//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the site
//! config once, applies global flags, and routes CLI subcommands to their
//! implementations.

pub mod cache;
pub mod dispatcher;
pub mod render;
pub mod tag;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Settings};
