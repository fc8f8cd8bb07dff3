//! Run results - per-episode records and JSON persistence

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use firebreak_core::{EvalError, IgnitionPoints};

use crate::episode::EpisodeOutcome;

/// Metrics of one completed episode. Immutable once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Accumulated reward over the episode
    pub reward: f64,
    /// Cells under an active containment action at termination
    pub cells_harvested: usize,
    /// Cells still burning at termination
    pub cells_on_fire: usize,
    /// Cells burned out at termination
    pub cells_burned: usize,
    /// Simulated steps the episode covered
    pub sim_steps: u32,
    /// Ignition points used
    pub ignition_points: Option<IgnitionPoints>,
}

impl From<&EpisodeOutcome> for EpisodeRecord {
    fn from(outcome: &EpisodeOutcome) -> Self {
        Self {
            reward: outcome.accumulated_reward,
            cells_harvested: outcome.cells_harvested,
            cells_on_fire: outcome.cells_on_fire,
            cells_burned: outcome.cells_burned,
            sim_steps: outcome.sim_steps,
            ignition_points: outcome.ignition_points.clone(),
        }
    }
}

/// Run-level configuration recorded alongside the episode records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub map: String,
    pub algo: String,
    pub action_space: String,
    pub reward_func: String,
    pub recorded_at: DateTime<Utc>,
}

/// The ordered result set of one evaluation run.
///
/// Created empty when the harness starts, appended to after every
/// episode, serialized exactly once at run completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRun {
    pub metadata: RunMetadata,
    pub episodes: Vec<EpisodeRecord>,
}

impl EvaluationRun {
    pub fn new(metadata: RunMetadata) -> Self {
        Self {
            metadata,
            episodes: Vec::new(),
        }
    }

    pub fn push(&mut self, record: EpisodeRecord) {
        self.episodes.push(record);
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Mean accumulated reward across episodes.
    pub fn mean_reward(&self) -> f64 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        self.episodes.iter().map(|e| e.reward).sum::<f64>() / self.episodes.len() as f64
    }
}

/// Destination for the finished result set.
pub trait ResultsSink {
    fn persist(&mut self, run: &EvaluationRun) -> Result<(), EvalError>;
}

/// Writes the run as one JSON document into an output directory.
#[derive(Clone, Debug)]
pub struct JsonResultsSink {
    output_dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl JsonResultsSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            last_written: None,
        }
    }

    /// Path of the most recently written artifact.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    fn artifact_path(&self, run: &EvaluationRun) -> PathBuf {
        let stamp = run.metadata.recorded_at.format("%Y%m%d_%H%M%S");
        self.output_dir.join(format!(
            "{}_{}_{}.json",
            run.metadata.map, run.metadata.algo, stamp
        ))
    }
}

impl ResultsSink for JsonResultsSink {
    fn persist(&mut self, run: &EvaluationRun) -> Result<(), EvalError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.artifact_path(run);
        let content = serde_json::to_string_pretty(run).map_err(std::io::Error::other)?;
        std::fs::write(&path, content)?;
        self.last_written = Some(path);
        Ok(())
    }
}
