use anyhow::{Context, Result};
use clap::Parser;
use recall_sweep::db::Db;
use recall_sweep::ingest::{discover_files, ingest_files};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "ingest-store")]
#[command(about = "Build a SQLite document store from a directory of .txt/.md files (incremental by default)")]
struct Args {
    /// Directory to walk for documents
    #[arg(short, long)]
    source: PathBuf,

    /// SQLite database to create or update
    #[arg(short, long, default_value = "data/documents.db")]
    database: PathBuf,

    /// Re-ingest every file, ignoring stored content hashes
    #[arg(short, long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();
    let db = Db::new(&args.database);
    log::info!("Starting document store ingestion");
    log::info!("Source: {}", args.source.display());
    log::info!("Database: {}", db.path().display());

    let files = discover_files(&args.source)
        .with_context(|| format!("Failed to scan {}", args.source.display()))?;
    if files.is_empty() {
        log::warn!("No .txt or .md files found under {}", args.source.display());
        return Ok(());
    }

    let total_bytes: u64 = files.iter().map(|f| f.file_size).sum();
    log::info!("Found {} files ({} bytes)", files.len(), total_bytes);

    if let Some(parent) = db.path().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let start = Instant::now();
    let stats = db.with_connection(|conn| {
        let stats = ingest_files(conn, &files, args.force)?;
        // Read-only opens of a WAL file need a writable -shm alongside it
        conn.execute_batch("PRAGMA journal_mode = DELETE;")?;
        Ok(stats)
    })?;

    println!("\n=== Ingestion Summary ===");
    println!("Files found:  {} ({} bytes)", files.len(), total_bytes);
    println!("Inserted:     {}", stats.inserted);
    println!("Updated:      {}", stats.updated);
    println!("Unchanged:    {}", stats.unchanged);
    println!("Elapsed:      {:?}", start.elapsed());

    Ok(())
}
