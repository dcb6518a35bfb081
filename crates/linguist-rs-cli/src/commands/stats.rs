//! The `stats` command: summarize a catalog.

use std::io::Write;

use linguist_rs_core::{LinguistError, LinguistResult, Settings};

use crate::command::Command;

/// Prints entry counts, overall and per context.
pub struct StatsCommand;

impl Command for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn help(&self) -> &'static str {
        "Show translation progress for a catalog"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::file_arg()).arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Print the counts as JSON"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()> {
        let catalog = super::load_input(matches)?;
        let stats = catalog.stats();

        if matches.get_flag("json") {
            let report = serde_json::json!({
                "language": catalog.language_code(),
                "source_language": catalog.source_language_code(),
                "contexts": catalog.contexts().len(),
                "stats": stats,
            });
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| LinguistError::SerializationError(e.to_string()))?;
            writeln!(out, "{text}")?;
            return Ok(());
        }

        writeln!(
            out,
            "Language: {} (source: {})",
            catalog.language_code(),
            catalog.source_language_code()
        )?;
        writeln!(out, "{stats}")?;
        writeln!(out, "Plural entries: {}", stats.plural)?;
        writeln!(out, "Entries with length variants: {}", stats.with_variants)?;
        for context in catalog.contexts() {
            let count = catalog.entries().filter(|e| e.context == context).count();
            writeln!(out, "  {context}: {count}")?;
        }
        Ok(())
    }
}
