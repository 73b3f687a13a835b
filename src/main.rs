//! Recall sweep CLI: evaluate a ranker at every odd retrieval depth.

use anyhow::{Context, Result};
use clap::Parser;
use recall_sweep::{
    build_ranker,
    config::CONFIG_ENV,
    eval,
    logging::{self, DEFAULT_LOG_PATH},
    read_csv,
    report::{report_all, ConsoleReporter, JsonReporter, PlotReporter, Reporter},
    store::resolve_database,
    Config, SqliteDocumentStore,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recall-sweep")]
#[command(about = "Measure recall-at-n of a document ranker over a question/answer dataset")]
struct Args {
    /// Path to a JSON ranker config
    #[arg(long = "config-path", alias = "config_path", env = CONFIG_ENV, default_value = "configs/ranker_bm25.json")]
    config_path: PathBuf,

    /// Path to a CSV dataset (header row, then question,answer rows)
    #[arg(long = "dataset-path", alias = "dataset_path", default_value = "data/qa.csv")]
    dataset_path: PathBuf,

    /// Path or http(s) URL of the SQLite document store
    #[arg(long = "database-url", alias = "database_url", default_value = "data/documents.db")]
    database_url: String,

    /// Top n documents to retrieve. Accepted but unused: the sweep covers every odd depth.
    #[arg(short = 'n', long = "number-retrieve", default_value_t = 5)]
    number_retrieve: usize,

    /// Log file
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Directory for recall_mapping.json and recall_plot.svg
    #[arg(long, default_value = "eval_results")]
    output_dir: PathBuf,

    /// Where remote document stores are downloaded
    #[arg(long, default_value = "downloads")]
    cache_dir: PathBuf,

    /// Skip rendering the SVG plot
    #[arg(long)]
    no_plot: bool,
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let dataset = read_csv(&args.dataset_path)
        .with_context(|| format!("Failed to read dataset {}", args.dataset_path.display()))?;

    let db_path = resolve_database(&args.database_url, &args.cache_dir)
        .with_context(|| format!("Failed to resolve document store {}", args.database_url))?;
    let store = SqliteDocumentStore::open(&db_path)
        .with_context(|| format!("Failed to open document store {}", db_path.display()))?;

    let ranker = build_ranker(&config.ranker, &store)?;

    println!(
        "Running recall sweep on {} questions ({} ranker, store {})\n",
        dataset.len(),
        ranker.name(),
        db_path.display()
    );

    let mapping = eval::run(ranker.as_ref(), &store, &dataset)?;

    let mut reporters: Vec<Box<dyn Reporter>> = vec![
        Box::new(ConsoleReporter),
        Box::new(JsonReporter::new(
            args.output_dir.join("recall_mapping.json"),
            ranker.name(),
            dataset.len(),
        )),
    ];
    if !args.no_plot {
        reporters.push(Box::new(PlotReporter::new(
            args.output_dir.join("recall_plot.svg"),
            format!("{} ranker recall", ranker.name()),
        )));
    }
    let written = report_all(&reporters, &mapping);
    if written < reporters.len() {
        println!(
            "\n{} of {} reports failed; see {}",
            reporters.len() - written,
            reporters.len(),
            args.log_path.display()
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    // .env may set RECALL_SWEEP_CONFIG / RUST_LOG
    let _ = dotenv::dotenv();

    let args = Args::parse();
    let config = Config::load(&args.config_path)?;

    logging::init(&args.log_path, config.level_filter())?;
    log::info!("Starting recall-sweep v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Ranker config: {} ({})", args.config_path.display(), config.ranker.kind());
    log::debug!("--number-retrieve={} (not used by the sweep)", args.number_retrieve);

    if let Err(e) = run(&args, &config) {
        log::error!("Run failed: {:#}", e);
        return Err(e);
    }

    println!("\nLog written to {}", args.log_path.display());
    Ok(())
}
