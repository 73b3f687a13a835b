//! Reporting the recall curve: console table, JSON artifact, SVG plot.

pub mod json;
pub mod plot;

pub use json::JsonReporter;
pub use plot::PlotReporter;

use crate::error::Result;
use crate::eval::RecallMapping;

/// Consumes a finished recall mapping.
pub trait Reporter {
    fn report(&self, mapping: &RecallMapping) -> Result<()>;

    fn name(&self) -> &str;
}

/// Prints the recall table to stdout
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn render(mapping: &RecallMapping) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:-<44}\n", ""));
        out.push_str(&format!("{:>8} {:>16} {:>16}\n", "Depth", "Fraction", "Recall"));
        out.push_str(&format!("{:-<44}\n", ""));
        for point in mapping.points() {
            out.push_str(&format!(
                "{:>8} {:>16.4} {:>15.2}%\n",
                point.depth,
                point.fraction,
                point.recall * 100.0
            ));
        }
        out.push_str(&format!("{:-<44}\n", ""));
        out
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, mapping: &RecallMapping) -> Result<()> {
        println!("\n=== Recall by Retrieval Depth ({} documents) ===\n", mapping.doc_count());
        print!("{}", Self::render(mapping));
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Run every reporter; failures are logged and skipped. Returns how many
/// reporters succeeded.
pub fn report_all(reporters: &[Box<dyn Reporter>], mapping: &RecallMapping) -> usize {
    let mut ok = 0;
    for reporter in reporters {
        match reporter.report(mapping) {
            Ok(()) => ok += 1,
            Err(e) => log::warn!("{} reporter failed: {}", reporter.name(), e),
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    struct FailingReporter;

    impl Reporter for FailingReporter {
        fn report(&self, _mapping: &RecallMapping) -> Result<()> {
            Err(SweepError::Report("no display".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn sample_mapping() -> RecallMapping {
        let mut mapping = RecallMapping::new(4);
        mapping.insert(1, 0.25);
        mapping.insert(3, 0.75);
        mapping
    }

    #[test]
    fn test_console_render() {
        let table = ConsoleReporter::render(&sample_mapping());
        assert!(table.contains("Depth"));
        assert!(table.contains("0.2500"));
        assert!(table.contains("75.00%"));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn test_report_all_skips_failures() {
        let reporters: Vec<Box<dyn Reporter>> = vec![Box::new(FailingReporter), Box::new(ConsoleReporter)];
        assert_eq!(report_all(&reporters, &sample_mapping()), 1);
    }
}
