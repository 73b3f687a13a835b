//! Recall-at-n sweep over odd retrieval depths.

use std::time::Instant;
use crate::dataset::DatasetRecord;
use crate::error::{Result, SweepError};
use crate::ranker::Ranker;
use crate::store::DocumentStore;
use super::mapping::RecallMapping;
use super::scoring::{instance_score, normalize_question};

/// Distance between consecutive depths: 1, 3, 5, ...
pub const SWEEP_STEP: usize = 2;

/// Depths visited for a corpus of `doc_count` documents (inclusive bound).
pub fn sweep_depths(doc_count: usize) -> impl Iterator<Item = usize> {
    (1..=doc_count).step_by(SWEEP_STEP)
}

/// Score one record at `depth`: rank, keep the first `depth` ids, fetch their
/// text and look for the answer.
fn score_record(
    ranker: &dyn Ranker,
    store: &dyn DocumentStore,
    record: &DatasetRecord,
    depth: usize,
) -> Result<u32> {
    let question = normalize_question(&record.question);
    let ranked = ranker.rank(&question, depth)?;

    let texts = ranked
        .iter()
        .take(depth)
        .map(|doc| store.get_content(&doc.doc_id))
        .collect::<Result<Vec<String>>>()?;

    Ok(instance_score(&[record.answer.as_str()], &texts))
}

/// Recall at every depth in `sweep_depths(store.doc_count())`.
///
/// Fails before any ranking if the dataset or the corpus is empty. Any ranker
/// or store error aborts the whole sweep.
pub fn sweep(
    ranker: &dyn Ranker,
    store: &dyn DocumentStore,
    dataset: &[DatasetRecord],
) -> Result<RecallMapping> {
    if dataset.is_empty() {
        return Err(SweepError::EmptyDataset);
    }
    let doc_count = store.doc_count()?;
    if doc_count == 0 {
        return Err(SweepError::EmptyCorpus);
    }

    log::info!("Dataset size: {}", dataset.len());
    log::info!("DB size: {}", doc_count);

    let dataset_size = dataset.len() as f64;
    let mut mapping = RecallMapping::new(doc_count);

    for depth in sweep_depths(doc_count) {
        let mut correct: u64 = 0;
        for record in dataset {
            correct += u64::from(score_record(ranker, store, record, depth)?);
        }

        let recall = correct as f64 / dataset_size;
        log::info!(
            "Percentage of the instances for which the correct document was retrieved in top {} retrieved documents: {}",
            depth,
            recall
        );
        mapping.insert(depth, recall);
    }

    Ok(mapping)
}

/// `sweep` with wall-clock timing and outcome logging. Errors are logged and
/// returned unchanged.
pub fn run(
    ranker: &dyn Ranker,
    store: &dyn DocumentStore,
    dataset: &[DatasetRecord],
) -> Result<RecallMapping> {
    let start = Instant::now();
    log::info!("Starting recall sweep with {} ranker", ranker.name());

    match sweep(ranker, store, dataset) {
        Ok(mapping) => {
            log::info!("Completed successfully in {} seconds.", start.elapsed().as_secs_f64());
            log::info!("Quality mapping: {}", mapping);
            Ok(mapping)
        }
        Err(e) => {
            log::error!("Sweep failed: {}", e);
            log::info!("Completed with exception in {} seconds", start.elapsed().as_secs_f64());
            Err(e)
        }
    }
}
