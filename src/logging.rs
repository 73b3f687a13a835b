//! File logging for evaluation runs.

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use crate::error::{Result, SweepError};

/// `05/17/2026 03:04:05 PM`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_PATH: &str = "eval_logs/ranker_recall.log";

/// One log line: `<timestamp>: [ <message> ]`
pub fn format_line(now: &DateTime<Local>, message: &std::fmt::Arguments<'_>) -> String {
    format!("{}: [ {} ]", now.format(TIMESTAMP_FORMAT), message)
}

/// Open the log file for appending, creating parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the process logger, writing every record to `log_path`.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(log_path: &Path, default_level: log::LevelFilter) -> Result<()> {
    let file = open_log_file(log_path)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.to_string()),
    )
    .format(|buf, record| writeln!(buf, "{}", format_line(&Local::now(), record.args())))
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init()
    .map_err(|e| SweepError::Config(format!("Logger already initialized: {}", e)))?;

    Ok(())
}
