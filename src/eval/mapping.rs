use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One sweep step of the recall curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecallPoint {
    /// Retrieval depth n
    pub depth: usize,
    /// n / doc_count
    pub fraction: f64,
    /// Fraction of questions answered within the top n documents
    pub recall: f64,
}

/// Recall per retrieval depth, keyed by depth fraction `n / doc_count`.
///
/// Entries are stored by the integer depth so keys stay exact; the fraction
/// is derived on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallMapping {
    doc_count: usize,
    recalls: BTreeMap<usize, f64>,
}

impl RecallMapping {
    pub fn new(doc_count: usize) -> Self {
        Self {
            doc_count,
            recalls: BTreeMap::new(),
        }
    }

    /// Record recall at `depth`. Returns the previous value if the depth was
    /// already present.
    pub fn insert(&mut self, depth: usize, recall: f64) -> Option<f64> {
        self.recalls.insert(depth, recall)
    }

    pub fn recall_at(&self, depth: usize) -> Option<f64> {
        self.recalls.get(&depth).copied()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn len(&self) -> usize {
        self.recalls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recalls.is_empty()
    }

    fn fraction(&self, depth: usize) -> f64 {
        if self.doc_count == 0 {
            return 0.0;
        }
        depth as f64 / self.doc_count as f64
    }

    /// Points sorted by ascending depth fraction
    pub fn points(&self) -> Vec<RecallPoint> {
        self.recalls
            .iter()
            .map(|(&depth, &recall)| RecallPoint {
                depth,
                fraction: self.fraction(depth),
                recall,
            })
            .collect()
    }

    /// Parallel x (fraction) / y (recall) series for plotting
    pub fn series(&self) -> (Vec<f64>, Vec<f64>) {
        self.points().into_iter().map(|p| (p.fraction, p.recall)).unzip()
    }

    /// True if recall never decreases as depth grows
    pub fn is_monotone(&self) -> bool {
        let recalls: Vec<f64> = self.recalls.values().copied().collect();
        recalls.windows(2).all(|w| w[0] <= w[1])
    }
}

impl fmt::Display for RecallMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, point) in self.points().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", point.fraction, point.recall)?;
        }
        write!(f, "}}")
    }
}
