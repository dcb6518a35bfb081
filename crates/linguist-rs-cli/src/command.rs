//! Command framework for the linguist-rs CLI.
//!
//! This module provides the [`Command`] trait for defining subcommands and
//! [`CommandRegistry`] for registering, discovering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use std::io::Write;
//!
//! use linguist_rs_cli::command::Command;
//! use linguist_rs_core::{LinguistResult, Settings};
//!
//! struct LanguageCommand;
//!
//! impl Command for LanguageCommand {
//!     fn name(&self) -> &'static str { "language" }
//!     fn help(&self) -> &'static str { "Print the configured language" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &Settings,
//!         out: &mut dyn Write,
//!     ) -> LinguistResult<()> {
//!         writeln!(out, "{}", settings.language_code)?;
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::io::Write;

use linguist_rs_core::{LinguistError, LinguistResult, Settings};

/// Name of the global configuration-file option.
pub const CONFIG_ARG: &str = "config";

/// Name of the global verbosity flag.
pub const VERBOSE_ARG: &str = "verbose";

/// A subcommand that can be registered and invoked through the CLI.
///
/// All commands must be `Send + Sync` so a registry can be shared.
pub trait Command: Send + Sync {
    /// Returns the name used to invoke this command.
    fn name(&self) -> &'static str;

    /// Returns a short help description for this command.
    fn help(&self) -> &'static str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command, writing its report to `out`.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()>;
}

/// A registry of subcommands.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// plus the global `--config` and `--verbose` options.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("linguist-rs")
            .about("Inspect and query Qt Linguist translation catalogs")
            .subcommand_required(true)
            .arg(
                clap::Arg::new(CONFIG_ARG)
                    .long("config")
                    .short('c')
                    .global(true)
                    .value_name("FILE")
                    .help("Settings file (.toml or .json)"),
            )
            .arg(
                clap::Arg::new(VERBOSE_ARG)
                    .long("verbose")
                    .short('v')
                    .global(true)
                    .action(clap::ArgAction::SetTrue)
                    .help("Log at debug level in human-readable form"),
            );

        for name in self.list_commands() {
            let cmd = &self.commands[name];
            let subcmd = clap::Command::new(cmd.name()).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Executes the command selected in `matches`.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            LinguistError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            LinguistError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "Running command");
        cmd.handle(sub_matches, settings, out)
    }
}
