//! # linguist-rs-cli
//!
//! Command-line tooling for linguist-rs catalogs.
//!
//! This crate provides a small framework for subcommands ([`Command`] and
//! [`CommandRegistry`]) plus the built-in `lookup`, `check`, `stats` and
//! `export` commands. The `linguist-rs` binary wires them to settings and
//! logging.
//!
//! ## Quick Start
//!
//! ```rust
//! use linguist_rs_cli::command::CommandRegistry;
//! use linguist_rs_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"lookup"));
//! assert!(names.contains(&"check"));
//! ```

#![allow(clippy::doc_markdown)]

pub mod command;
pub mod commands;

use std::io::Write;
use std::path::Path;

use linguist_rs_core::{settings_loader, LinguistResult, Settings};

pub use command::{Command, CommandRegistry};

/// Builds a registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Resolves the settings for a CLI run.
///
/// With `--config` the file is read and `LINGUIST_*` variables override it;
/// otherwise settings come from the environment alone. `--verbose` forces
/// debug-level, human-readable logging.
pub fn load_settings(matches: &clap::ArgMatches) -> LinguistResult<Settings> {
    let mut settings = match matches.get_one::<String>(command::CONFIG_ARG) {
        Some(path) => settings_loader::from_file_with_env(Path::new(path))?,
        None => settings_loader::from_env(),
    };
    if matches.get_flag(command::VERBOSE_ARG) {
        settings.debug = true;
        settings.log_level = "debug".to_string();
    }
    Ok(settings)
}

/// Parses `args`, loads settings and runs the selected command.
///
/// Logging is not installed here; the binary does that once the settings
/// are known.
pub fn run<I, T>(registry: &CommandRegistry, args: I, out: &mut dyn Write) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = registry.build_cli().try_get_matches_from(args)?;
    let settings = load_settings(&matches)?;
    registry.execute(&matches, &settings, out)?;
    Ok(())
}
