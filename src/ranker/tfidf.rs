//! In-memory TF-IDF ranker with cosine similarity.

use regex::Regex;
use std::collections::HashMap;
use crate::error::{Result, SweepError};
use crate::store::{DocumentId, DocumentStore};
use super::{is_stop_word, RankedDocument, Ranker};

/// TF-IDF index over every document of a store.
///
/// Document vectors are L2-normalized and stored as postings
/// (term → [(doc, weight)]), so scoring a query only touches documents that
/// share at least one term with it.
pub struct TfidfRanker {
    token_re: Regex,
    sublinear_tf: bool,
    stop_words: bool,
    doc_ids: Vec<DocumentId>,
    idf: HashMap<String, f32>,
    postings: HashMap<String, Vec<(usize, f32)>>,
}

impl TfidfRanker {
    /// Index every document in `store`.
    pub fn build(store: &dyn DocumentStore, sublinear_tf: bool, stop_words: bool) -> Result<Self> {
        let start = std::time::Instant::now();
        let token_re = Regex::new(r"\w+")
            .map_err(|e| SweepError::Ranker(format!("Invalid token pattern: {}", e)))?;

        let mut ranker = Self {
            token_re,
            sublinear_tf,
            stop_words,
            doc_ids: Vec::new(),
            idf: HashMap::new(),
            postings: HashMap::new(),
        };

        let doc_ids = store.doc_ids()?;
        let mut term_counts: Vec<HashMap<String, u32>> = Vec::with_capacity(doc_ids.len());
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for id in &doc_ids {
            let counts = ranker.term_counts(&store.get_content(id)?);
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        // Smoothed idf: ln((1 + N) / (1 + df)) + 1
        let n_docs = doc_ids.len() as f32;
        ranker.idf = doc_freq
            .into_iter()
            .map(|(term, df)| {
                let idf = ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0;
                (term, idf)
            })
            .collect();

        for (doc_idx, counts) in term_counts.into_iter().enumerate() {
            let weights = ranker.weigh(counts);
            for (term, weight) in weights {
                ranker.postings.entry(term).or_default().push((doc_idx, weight));
            }
        }
        ranker.doc_ids = doc_ids;

        log::info!(
            "TF-IDF index built over {} documents, {} terms in {:?}",
            ranker.doc_ids.len(),
            ranker.idf.len(),
            start.elapsed()
        );
        Ok(ranker)
    }

    fn tokenize<'t>(&'t self, text: &'t str) -> impl Iterator<Item = String> + 't {
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(move |t| !(self.stop_words && is_stop_word(t)))
    }

    fn term_counts(&self, text: &str) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// tf × idf per term, L2-normalized. Terms unknown to the index are dropped.
    fn weigh(&self, counts: HashMap<String, u32>) -> Vec<(String, f32)> {
        let mut weights: Vec<(String, f32)> = counts
            .into_iter()
            .filter_map(|(term, count)| {
                let idf = *self.idf.get(&term)?;
                let tf = if self.sublinear_tf {
                    1.0 + (count as f32).ln()
                } else {
                    count as f32
                };
                Some((term, tf * idf))
            })
            .collect();

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in weights.iter_mut() {
                *w /= norm;
            }
        }
        weights
    }
}

impl Ranker for TfidfRanker {
    fn rank(&self, query: &str, depth: usize) -> Result<Vec<RankedDocument>> {
        let query_weights = self.weigh(self.term_counts(query));

        let mut scores: HashMap<usize, f32> = HashMap::new();
        for (term, q_weight) in &query_weights {
            if let Some(postings) = self.postings.get(term) {
                for &(doc_idx, d_weight) in postings {
                    *scores.entry(doc_idx).or_insert(0.0) += q_weight * d_weight;
                }
            }
        }

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().filter(|(_, s)| *s > 0.0).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.doc_ids[a.0].cmp(&self.doc_ids[b.0]))
        });

        Ok(ranked
            .into_iter()
            .take(depth)
            .map(|(doc_idx, score)| RankedDocument {
                doc_id: self.doc_ids[doc_idx].clone(),
                score,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn sample_store() -> MemoryDocumentStore {
        MemoryDocumentStore::from_documents([
            ("drones", "Drones are unmanned aerial vehicles. Drones fly."),
            ("cameras", "A camera captures photos; drones often carry a camera."),
            ("batteries", "Lithium batteries power most consumer electronics."),
        ])
    }

    #[test]
    fn test_rank_best_match_first() {
        let ranker = TfidfRanker::build(&sample_store(), true, true).unwrap();
        let results = ranker.rank("What powers electronics?", 3).unwrap();
        assert_eq!(results[0].doc_id, "batteries");
        assert!(results.iter().all(|r| r.doc_id != "drones"));
    }

    #[test]
    fn test_rank_scores_descending_and_bounded() {
        let ranker = TfidfRanker::build(&sample_store(), false, true).unwrap();
        let results = ranker.rank("drones camera", 3).unwrap();
        assert_eq!(results.len(), 2);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(results.iter().all(|r| r.score > 0.0 && r.score <= 1.0 + 1e-5));
    }

    #[test]
    fn test_rank_depth_truncates() {
        let ranker = TfidfRanker::build(&sample_store(), true, true).unwrap();
        assert_eq!(ranker.rank("drones camera", 1).unwrap().len(), 1);
        assert!(ranker.rank("drones", 0).unwrap().is_empty());
    }

    #[test]
    fn test_rank_ties_broken_by_id() {
        let store = MemoryDocumentStore::from_documents([("b", "same words"), ("a", "same words")]);
        let ranker = TfidfRanker::build(&store, true, true).unwrap();
        let ids: Vec<String> = ranker.rank("same", 2).unwrap().into_iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_stop_word_only_query() {
        let ranker = TfidfRanker::build(&sample_store(), true, true).unwrap();
        assert!(ranker.rank("the of and", 3).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_terms() {
        let ranker = TfidfRanker::build(&sample_store(), true, true).unwrap();
        assert!(ranker.rank("submarine", 3).unwrap().is_empty());
    }
}
