//! Evaluation: answer matching, recall mapping, and the depth sweep.

pub mod mapping;
pub mod scoring;
pub mod sweep;

pub use mapping::{RecallMapping, RecallPoint};
pub use scoring::{instance_score, normalize_question};
pub use sweep::{run, sweep, sweep_depths, SWEEP_STEP};
