use std::process::ExitCode;

use linguist_rs_cli::{default_registry, load_settings};
use linguist_rs_core::logging::setup_logging;
use linguist_rs_core::SETTINGS;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let registry = default_registry();
    let matches = registry.build_cli().get_matches();

    let settings = load_settings(&matches)?;
    setup_logging(&settings);
    SETTINGS.configure(settings.clone());

    let mut stdout = std::io::stdout().lock();
    registry.execute(&matches, &settings, &mut stdout)?;
    Ok(())
}
