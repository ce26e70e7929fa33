//! GOOD invocation
use log::{debug, error, info};
use std::{
    fs,
    io::Result,
    path::{Path, PathBuf},
    process::Command,
};

use crate::document::Document;

/// Configuration file that only lives for one GOOD run:
/// it is deleted as soon as it is dropped.
pub struct TemporaryConfig {
    path: PathBuf,
}

impl TemporaryConfig {
    /// Writes `document` to its location, within the data directory
    pub fn create(document: &Document) -> Result<Self> {
        let path = document.path();
        fs::write(&path, document.to_string())?;
        info!("\"{}\" has been generated", path.display());
        Ok(Self { path })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TemporaryConfig {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(_) => debug!("\"{}\" has been deleted", self.path.display()),
            Err(e) => error!("failed to delete \"{}\": {}", self.path.display(), e),
        }
    }
}

/// Runs `executable` with `config` as its only argument, and waits
/// for it to return. Its exit status is not interpreted.
pub fn invoke(executable: &str, config: &Path) {
    info!("running \"{} {}\"", executable, config.display());
    match Command::new(executable).arg(config).status() {
        Ok(status) => debug!("\"{}\" returned: {}", executable, status),
        Err(e) => error!("failed to run \"{}\": {}", executable, e),
    }
}

/// Writes the configuration, runs GOOD, then deletes the configuration,
/// whatever the outcome of the run.
pub fn run(executable: &str, document: &Document) -> Result<()> {
    let config = TemporaryConfig::create(document)?;
    invoke(executable, config.path());
    Ok(())
}
