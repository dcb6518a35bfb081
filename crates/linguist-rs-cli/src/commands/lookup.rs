//! The `lookup` command: resolve one message against a catalog.

use std::io::Write;

use linguist_rs_core::resolver::{resolve, MessageRequest, ResolveOptions};
use linguist_rs_core::{LinguistError, LinguistResult, Settings};

use crate::command::Command;

/// Resolves a message the way an application would and prints the result.
///
/// ```text
/// linguist-rs lookup nl.ts --context UIActionPool --source "&Close"
/// linguist-rs lookup nl.ts --context UIWizard --source "%n disk(s)" -n 3
/// linguist-rs lookup nl.ts --context UIInfo --source "Copy %1 to %2" --arg a --arg b
/// ```
pub struct LookupCommand;

impl Command for LookupCommand {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn help(&self) -> &'static str {
        "Resolve a message against a catalog"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::file_arg())
            .arg(
                clap::Arg::new("context")
                    .long("context")
                    .required(true)
                    .help("Context the message belongs to"),
            )
            .arg(
                clap::Arg::new("source")
                    .long("source")
                    .short('s')
                    .required(true)
                    .help("Untranslated source text"),
            )
            .arg(
                clap::Arg::new("comment")
                    .long("comment")
                    .help("Disambiguating comment"),
            )
            .arg(
                clap::Arg::new("quantity")
                    .short('n')
                    .long("quantity")
                    .allow_negative_numbers(true)
                    .value_parser(clap::value_parser!(i64))
                    .help("Plural quantity"),
            )
            .arg(
                clap::Arg::new("arg")
                    .long("arg")
                    .short('a')
                    .action(clap::ArgAction::Append)
                    .help("Positional argument for %1..%99 (repeatable)"),
            )
            .arg(
                clap::Arg::new("width")
                    .long("width")
                    .short('w')
                    .value_parser(clap::value_parser!(usize))
                    .help("Available display width for length variants"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()> {
        let catalog = super::load_input(matches)?;

        let context = required(matches, "context")?;
        let source = required(matches, "source")?;
        let mut request = MessageRequest::new(context, source);
        if let Some(comment) = matches.get_one::<String>("comment") {
            request = request.with_comment(comment);
        }
        if let Some(&quantity) = matches.get_one::<i64>("quantity") {
            request = request.with_quantity(quantity);
        }
        if let Some(args) = matches.get_many::<String>("arg") {
            request = request.with_args(args.map(String::as_str));
        }
        if let Some(&width) = matches.get_one::<usize>("width") {
            request = request.with_size_hint(width);
        }

        let text = resolve(&catalog, &request, &ResolveOptions::from(settings));
        writeln!(out, "{text}")?;
        Ok(())
    }
}

fn required<'m>(matches: &'m clap::ArgMatches, id: &str) -> LinguistResult<&'m str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| LinguistError::ConfigurationError(format!("Missing --{id}")))
}
