use walkdir::WalkDir;
use std::path::{Path, PathBuf};
use crate::error::{Result, SweepError};

/// Metadata for a discovered file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub file_size: u64,
}

/// Discover plain-text documents (`.txt`, `.md`, case-insensitive) under `root`.
///
/// Results are sorted by relative path so ingestion order is reproducible.
pub fn discover_files(root: &Path) -> Result<Vec<FileMetadata>> {
    if !root.is_dir() {
        return Err(SweepError::FileNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        if !matches!(extension.as_str(), "txt" | "md") {
            continue;
        }

        let metadata = std::fs::metadata(path)?;

        // Forward slashes on every platform: the relative path becomes the document id
        let relative_path = path
            .strip_prefix(root)
            .map_err(|_| SweepError::Config(
                format!("Failed to compute relative path for: {}", path.display())
            ))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        files.push(FileMetadata {
            relative_path,
            absolute_path: path.to_path_buf(),
            file_size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::info!("Discovered {} files in {}", files.len(), root.display());
    Ok(files)
}
