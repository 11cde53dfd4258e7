pub mod components;

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use docfront_config::{ConfigFile, LoadOptions};
use docfront_options::{Component, ExitCode, Finalized, OptionParser, OptionsError};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::components::{HtmlWriter, RstParser, StandaloneReader};

/// Names a configuration file read after the standard locations.
pub const CONFIG_ENV: &str = "DOCFRONT_CONFIG";
/// Log filter directives, e.g. `docfront_options=debug`.
pub const LOG_ENV: &str = "DOCFRONT_LOG";

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    init_logging();

    let components: [Option<&dyn Component>; 3] =
        [Some(&StandaloneReader), Some(&RstParser), Some(&HtmlWriter)];
    let parser = OptionParser::new(components)?;

    let mut load = LoadOptions::default();
    if let Some(path) = env::var_os(CONFIG_ENV) {
        load = load.with_override_path(PathBuf::from(path));
    }
    let config = ConfigFile::load(load)?;
    debug!(layers = config.layers().len(), "configuration loaded");

    let file_settings = match parser
        .option_set()
        .config_settings(config.settings_for(parser.config_sections()))
    {
        Ok(settings) => settings,
        Err(err) => return Ok(report(&err)),
    };

    let (settings, args) = match parser.parse_layered(env::args_os(), file_settings) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };

    match parser.finalize(settings, args) {
        Ok(finalized) => {
            emit(&finalized)?;
            Ok(ExitCode::Success as i32)
        }
        Err(err) => Ok(report(&err)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // fails only when a global subscriber is already installed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn report(err: &OptionsError) -> i32 {
    eprintln!("docfront: {err}");
    err.exit_code() as i32
}

fn emit(finalized: &Finalized) -> Result<()> {
    let payload = json!({
        "source": finalized.source,
        "destination": finalized.destination,
        "settings": finalized.settings,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
