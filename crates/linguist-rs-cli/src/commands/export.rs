//! The `export` command: write a JSON snapshot of a catalog.

use std::io::Write;
use std::path::PathBuf;

use linguist_rs_core::{LinguistResult, Settings};

use crate::command::Command;

/// Converts a catalog to its JSON snapshot form, on stdout or into a file.
pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }

    fn help(&self) -> &'static str {
        "Write a catalog as a JSON snapshot"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::file_arg()).arg(
            clap::Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write to this file instead of stdout"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
        out: &mut dyn Write,
    ) -> LinguistResult<()> {
        let catalog = super::load_input(matches)?;
        let json = linguist_rs_ts::json::to_json(&catalog)?;

        match matches.get_one::<PathBuf>("output") {
            Some(path) => {
                std::fs::write(path, json)?;
                tracing::info!(path = %path.display(), entries = catalog.len(), "Wrote snapshot");
                writeln!(out, "Wrote {} entries to {}", catalog.len(), path.display())?;
            }
            None => writeln!(out, "{json}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_to_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let ts = dir.path().join("nl.ts");
        std::fs::write(
            &ts,
            r#"<TS version="2.1" language="nl"><context><name>UIWizard</name>
            <message numerus="yes"><source>%n disk(s)</source><translation>
                <numerusform>%n schijf</numerusform><numerusform>%n schijven</numerusform>
            </translation></message>
            </context></TS>"#,
        )
        .unwrap();
        let target = dir.path().join("nl.json");

        let matches = ExportCommand
            .add_arguments(clap::Command::new("export"))
            .try_get_matches_from([
                "export",
                ts.to_str().unwrap(),
                "--output",
                target.to_str().unwrap(),
            ])
            .unwrap();
        let mut out = Vec::new();
        ExportCommand
            .handle(&matches, &Settings::default(), &mut out)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Wrote 1 entries"));

        let snapshot = std::fs::read_to_string(&target).unwrap();
        let catalog = linguist_rs_ts::json::load_catalog_json(&snapshot).unwrap();
        assert_eq!(catalog.trn("UIWizard", "%n disk(s)", 2), "2 schijven");
    }
}
