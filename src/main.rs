//! Command line front-end to GOOD (GNSS Observations and prOducts Downloader).
//! Generates the GOOD configuration from the command line, runs GOOD with it,
//! then deletes it. Refer to `run-good -h` for the command line arguments.
mod cli;
mod document;
mod launcher;
mod platform;

use cli::{help_requested, Cli, MIN_ARGS};
use document::ProcTime;
use platform::Platform;

use env_logger::{Builder, Target};
use hifitime::Epoch;
use log::{debug, warn};
use std::ffi::OsString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("failed to determine current time: {0}")]
    SystemTime(String),
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() <= MIN_ARGS || help_requested(&args) {
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let cli = Cli::try_from_args(args).unwrap_or_else(|e| e.exit());

    let platform = Platform::current();
    debug!("platform: {}", platform);

    let time = match cli.proc_time() {
        Some(time) => time,
        None => {
            let now = Epoch::now().map_err(|e| Error::SystemTime(e.to_string()))?;
            let time = ProcTime::from(now);
            warn!("no processing time defined, using today: {}", time);
            time
        },
    };

    let document = cli.document(platform, time);
    launcher::run(cli.executable(), &document)?;
    Ok(())
}
