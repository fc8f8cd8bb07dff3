//! FIREBREAK Eval - Episode evaluation harness
//!
//! This crate provides the evaluation infrastructure:
//! - Ignition sourcing (random, fixed, replayed-from-file)
//! - The per-episode runner with parallel frame capture
//! - The run-level harness and JSON results persistence

mod config;
mod episode;
mod harness;
mod ignition_source;
mod recorder;
mod results;

pub use config::EvalConfig;
pub use episode::{EpisodeOutcome, EpisodeRunner};
pub use harness::EvaluationHarness;
pub use ignition_source::{IgnitionPlan, IgnitionSource};
pub use recorder::{NullRecorder, VideoRecorder};
pub use results::{EpisodeRecord, EvaluationRun, JsonResultsSink, ResultsSink, RunMetadata};
