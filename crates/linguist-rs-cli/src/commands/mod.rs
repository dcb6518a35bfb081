//! Built-in subcommands.
//!
//! Each command implements the [`Command`](crate::command::Command) trait and
//! takes a catalog path as its first positional argument. Files ending in
//! `.json` are read as snapshots; anything else is parsed as TS.

pub mod check;
pub mod export;
pub mod lookup;
pub mod stats;

pub use check::CheckCommand;
pub use export::ExportCommand;
pub use lookup::LookupCommand;
pub use stats::StatsCommand;

use std::path::{Path, PathBuf};

use linguist_rs_core::logging::catalog_span;
use linguist_rs_core::{Catalog, LinguistError, LinguistResult};

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(LookupCommand));
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(StatsCommand));
    registry.register(Box::new(ExportCommand));
}

/// The positional catalog argument shared by every command.
pub(crate) fn file_arg() -> clap::Arg {
    clap::Arg::new("file")
        .required(true)
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Catalog to read (.ts or .json snapshot)")
}

/// Loads the catalog named by the `file` argument.
pub(crate) fn load_input(matches: &clap::ArgMatches) -> LinguistResult<Catalog> {
    let path = matches
        .get_one::<PathBuf>("file")
        .ok_or_else(|| LinguistError::ConfigurationError("No catalog file given".to_string()))?;
    load_path(path)
}

fn load_path(path: &Path) -> LinguistResult<Catalog> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let catalog = if is_json {
        let text = std::fs::read_to_string(path)?;
        linguist_rs_ts::json::load_catalog_json(&text)?
    } else {
        linguist_rs_ts::load_catalog_file(path)?
    };

    let span = catalog_span(catalog.language_code());
    let _guard = span.enter();
    tracing::debug!(path = %path.display(), "Catalog ready");
    Ok(catalog)
}
