//! Environment contract consumed by the evaluation harness
//!
//! The fire-spread environment itself is an external collaborator (the
//! native simulator behind it runs as a subprocess, see [`crate::process`]).
//! The harness only depends on this trait.

use crate::error::EvalError;
use crate::ignition::IgnitionPoints;

/// Observation representation produced by the environment.
///
/// Learned policies trained on image input require `ForestRgb`; the
/// harness switches the environment before any episode runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    /// Flat per-cell feature vector
    Features,
    /// Forest raster flattened to RGB channels
    ForestRgb,
}

/// One observation of environment state.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub kind: ObservationKind,
    pub values: Vec<f32>,
}

impl Observation {
    pub fn features(values: Vec<f32>) -> Self {
        Self {
            kind: ObservationKind::Features,
            values,
        }
    }
}

/// Rendering mode requested from the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// On-screen rendering for a human watcher
    Human,
    /// Raw pixel buffer for capture
    RgbArray,
}

/// Raw RGB frame returned by `render(RgbArray)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Result of advancing the environment by one action.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    /// Auxiliary diagnostics, keyed by name
    pub info: rustc_hash::FxHashMap<String, f64>,
}

/// Contract the harness consumes from the simulation environment.
///
/// Object-safe on purpose: the episode runner and policy adapter hold
/// `&mut dyn FireEnvironment` so one harness serves every backend.
pub trait FireEnvironment {
    /// Reset for a new episode. `None` lets the environment pick its own
    /// random ignition; `Some` overrides with explicit points.
    fn reset(&mut self, ignition: Option<&IgnitionPoints>) -> Result<Observation, EvalError>;

    /// Advance one step under the given discrete action.
    fn step(&mut self, action: usize) -> Result<StepOutcome, EvalError>;

    /// Render current state; `RgbArray` yields a frame, `Human` may not.
    fn render(&mut self, mode: RenderMode) -> Option<Frame>;

    /// Release simulator resources.
    fn close(&mut self) -> Result<(), EvalError>;

    /// Number of discrete actions, including the no-op.
    fn action_count(&self) -> usize;

    /// The action index meaning "take no containment action".
    fn noop_action(&self) -> usize;

    /// Per-action legality under the current state.
    fn action_mask(&self) -> Vec<bool>;

    /// Cells currently under an active containment (harvest) action.
    fn cells_harvested(&self) -> usize;

    /// Cells currently burning.
    fn cells_on_fire(&self) -> usize;

    /// Cells already burned out.
    fn cells_burned(&self) -> usize;

    /// Simulated steps elapsed in the current episode.
    fn steps_taken(&self) -> u32;

    /// Ignition points in effect for the current episode; `None` before
    /// the first reset.
    fn ignition_points(&self) -> Option<&IgnitionPoints>;

    /// Force the observation representation for subsequent episodes.
    fn set_observation_kind(&mut self, kind: ObservationKind);
}
