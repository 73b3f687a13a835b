use rusqlite::{params, Connection};
use crate::db::schema;
use crate::error::{Result, SweepError};
use crate::store::DocumentStore;
use super::{is_stop_word, RankedDocument, Ranker};

/// Build an FTS5 MATCH expression from free text.
///
/// Terms are split on whitespace; stop words (ignoring surrounding
/// punctuation), single characters and terms
/// without any alphanumeric character are dropped. Each remaining term is
/// quoted as an FTS5 string (so `:`, `*`, `-` and friends are literal) and
/// the terms are OR-joined for recall. Returns `None` if nothing is left.
pub fn sanitize_fts5_query(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .filter(|term| {
            let lower = term.to_lowercase();
            let bare = lower.trim_matches(|c: char| !c.is_alphanumeric());
            !is_stop_word(bare) && term.chars().count() >= 2
        })
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// Normalize BM25 score from negative range to 0-1 range
///
/// FTS5 BM25 scores are negative (better matches = lower scores). Sigmoid
/// `1 / (1 + exp(raw))` maps them to (0, 1) with higher = better.
pub fn normalize_bm25_score(raw_score: f64) -> f32 {
    if raw_score.is_nan() || raw_score.is_infinite() {
        return 0.0;
    }
    let normalized = 1.0 / (1.0 + raw_score.exp());
    normalized as f32
}

/// BM25 ranker over an in-memory FTS5 index of the store's documents.
///
/// The index is built from the store's current contents when the ranker is
/// created, so it always mirrors the corpus being evaluated.
pub struct Fts5Bm25Ranker {
    index: Connection,
    min_score: f32,
}

impl Fts5Bm25Ranker {
    /// Index every document of `store`.
    pub fn build(store: &dyn DocumentStore, min_score: f32) -> Result<Self> {
        let start = std::time::Instant::now();

        let mut index = Connection::open_in_memory()?;
        schema::create_fts_index(&index)?;

        let doc_ids = store.doc_ids()?;
        let tx = index.transaction()?;
        {
            let mut insert = tx.prepare("INSERT INTO documents_fts (id, text) VALUES (?1, ?2)")?;
            for id in &doc_ids {
                insert.execute(params![id, store.get_content(id)?])?;
            }
        }
        tx.commit()?;

        log::info!("FTS5 index built over {} documents in {:?}", doc_ids.len(), start.elapsed());
        Ok(Self { index, min_score })
    }
}

impl Ranker for Fts5Bm25Ranker {
    fn rank(&self, query: &str, depth: usize) -> Result<Vec<RankedDocument>> {
        let start = std::time::Instant::now();

        if depth == 0 {
            return Ok(Vec::new());
        }
        let match_expr = match sanitize_fts5_query(query) {
            Some(expr) => expr,
            None => {
                log::debug!("Query has no searchable terms: {:?}", query);
                return Ok(Vec::new());
            }
        };

        let mut stmt = self.index.prepare_cached(
            r#"
            SELECT id, bm25(documents_fts) AS raw_score
            FROM documents_fts
            WHERE documents_fts MATCH ?1
            ORDER BY raw_score, id
            LIMIT ?2
            "#,
        )?;

        let mut rows = stmt
            .query(params![match_expr, depth as i64])
            .map_err(|e| SweepError::Ranker(format!("FTS5 query {:?} failed: {}", match_expr, e)))?;

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let doc_id: String = row.get(0)?;
            let raw_score: f64 = row.get(1)?;
            let score = normalize_bm25_score(raw_score);
            if score < self.min_score {
                continue;
            }
            results.push(RankedDocument { doc_id, score });
        }

        log::trace!("BM25 ranking took {:?}, returned {} results", start.elapsed(), results.len());
        Ok(results)
    }

    fn name(&self) -> &str {
        "bm25"
    }
}
