pub mod app;
pub mod commands;

pub use app::{Cli, Commands};

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open the log file, truncating output from the previous run
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))
}
