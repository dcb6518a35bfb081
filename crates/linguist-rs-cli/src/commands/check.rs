//! The `check` command: run catalog diagnostics.

use std::io::Write;

use linguist_rs_core::checks::{CheckLevel, CheckRegistry};
use linguist_rs_core::{LinguistError, LinguistResult, Settings};

use crate::command::Command;

/// Runs the built-in checks against a catalog and prints the findings.
///
/// Fails when any error-level message is found, or any warning with
/// `--strict`.
pub struct CheckCommand;

impl Command for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Run consistency checks on a catalog"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::file_arg())
            .arg(
                clap::Arg::new("tag")
                    .long("tag")
                    .short('t')
                    .action(clap::ArgAction::Append)
                    .help("Only run checks with this tag"),
            )
            .arg(
                clap::Arg::new("strict")
                    .long("strict")
                    .action(clap::ArgAction::SetTrue)
                    .help("Treat warnings as failures"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()> {
        let catalog = super::load_input(matches)?;
        let tags: Option<Vec<&str>> = matches
            .get_many::<String>("tag")
            .map(|tags| tags.map(String::as_str).collect());

        let messages = CheckRegistry::with_builtins().run_checks(tags.as_deref(), &catalog);
        if messages.is_empty() {
            writeln!(out, "Catalog check identified no issues.")?;
            return Ok(());
        }

        for msg in &messages {
            writeln!(out, "{msg}")?;
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();
        writeln!(
            out,
            "Catalog check identified {} issue(s) ({errors} error(s), {warnings} warning(s)).",
            messages.len()
        )?;

        let failing = if matches.get_flag("strict") {
            errors + warnings
        } else {
            errors
        };
        if failing > 0 {
            return Err(LinguistError::ConfigurationError(format!(
                "Catalog check found {failing} serious issue(s)"
            )));
        }
        Ok(())
    }
}
