//! Resolve `--database-url` to a local SQLite file, downloading remote stores once.

use crate::error::{Result, SweepError};
use std::path::{Path, PathBuf};
use url::Url;

const DEFAULT_DB_FILENAME: &str = "documents.db";

/// Where a database location points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Local(PathBuf),
    Remote(Url),
}

/// Classify a database location. Only http(s) and file URLs are treated as
/// URLs; anything else (including `C:\...`) is a filesystem path.
pub fn parse_location(database_url: &str) -> DatabaseLocation {
    match Url::parse(database_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => DatabaseLocation::Remote(url),
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => DatabaseLocation::Local(path),
            Err(()) => DatabaseLocation::Local(PathBuf::from(database_url)),
        },
        _ => DatabaseLocation::Local(PathBuf::from(database_url)),
    }
}

/// File name the remote store is cached under
fn cache_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_DB_FILENAME.to_string())
}

/// Return a local path for the database, downloading it into `cache_dir` if
/// `database_url` is remote and not already cached.
pub fn resolve_database(database_url: &str, cache_dir: &Path) -> Result<PathBuf> {
    let url = match parse_location(database_url) {
        DatabaseLocation::Local(path) => return Ok(path),
        DatabaseLocation::Remote(url) => url,
    };

    let target = cache_dir.join(cache_filename(&url));
    if target.exists() {
        log::info!("Using cached document store {}", target.display());
        return Ok(target);
    }

    std::fs::create_dir_all(cache_dir)?;
    log::info!("Downloading document store from {}", url);

    let start = std::time::Instant::now();
    let mut response = reqwest::blocking::get(url.clone())?.error_for_status()?;

    // Only complete downloads get the cached name
    let partial = target.with_extension("partial");
    let mut file = std::fs::File::create(&partial)?;
    let bytes = response.copy_to(&mut file)?;
    file.sync_all()?;
    drop(file);

    if bytes == 0 {
        std::fs::remove_file(&partial)?;
        return Err(SweepError::Config(format!("{} returned an empty body", url)));
    }
    std::fs::rename(&partial, &target)?;

    log::info!(
        "Downloaded {} bytes to {} in {:?}",
        bytes,
        target.display(),
        start.elapsed()
    );

    Ok(target)
}
