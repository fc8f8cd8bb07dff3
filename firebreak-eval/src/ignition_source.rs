//! Ignition sourcing - per-episode ignition configuration
//!
//! Three strategies: let the environment randomize, reuse a map's fixed
//! point set, or replay a pre-generated list one entry per episode.

use std::path::Path;

use tracing::warn;

use firebreak_core::{load_replay_file, EvalError, IgnitionPoints, MapCatalog};

/// How episode ignition is decided for a run.
#[derive(Clone, Debug)]
pub enum IgnitionPlan {
    /// Environment picks its own ignition each episode
    Random,
    /// Same points every episode
    Fixed(IgnitionPoints),
    /// One stored entry per episode index
    Replay(Vec<IgnitionPoints>),
}

/// Resolves the ignition configuration for each episode index.
#[derive(Clone, Debug)]
pub struct IgnitionSource {
    plan: IgnitionPlan,
}

impl IgnitionSource {
    pub fn new(plan: IgnitionPlan) -> Self {
        Self { plan }
    }

    /// Build from the user-facing ignition type: `random`, `fixed`, or a
    /// path to a replay `.json` file.
    ///
    /// `fixed` requires the catalog to register points for the map; a
    /// replay file must carry the map name as its file-name prefix.
    pub fn from_ignition_type(
        ignition_type: &str,
        map: &str,
        catalog: &MapCatalog,
    ) -> Result<Self, EvalError> {
        if ignition_type.ends_with(".json") {
            let entries = load_replay_file(Path::new(ignition_type), map)?;
            return Ok(Self::new(IgnitionPlan::Replay(entries)));
        }
        match ignition_type {
            "random" => Ok(Self::new(IgnitionPlan::Random)),
            "fixed" => {
                let points = catalog.fixed_ignition(map)?.clone();
                Ok(Self::new(IgnitionPlan::Fixed(points)))
            }
            other => Err(EvalError::UnknownIgnitionType(other.to_string())),
        }
    }

    /// Ignition input for one episode; `None` lets the environment
    /// randomize.
    ///
    /// Contract: for a replay plan, `episode_index` must be below
    /// [`IgnitionSource::episode_count`]. An index past the stored list
    /// also resolves to `None`, so a caller that ignores the bound would
    /// silently fall back to environment randomization instead of
    /// replaying.
    pub fn resolve(&self, episode_index: usize) -> Option<&IgnitionPoints> {
        match &self.plan {
            IgnitionPlan::Random => None,
            IgnitionPlan::Fixed(points) => Some(points),
            IgnitionPlan::Replay(entries) => entries.get(episode_index),
        }
    }

    /// Total episodes for the run.
    ///
    /// A replay plan always runs exactly one episode per stored entry,
    /// overriding the requested count; the override is surfaced as a
    /// warning, not an error.
    pub fn episode_count(&self, requested: usize) -> usize {
        match &self.plan {
            IgnitionPlan::Replay(entries) => {
                if entries.len() != requested {
                    warn!(
                        requested,
                        replay_len = entries.len(),
                        "overriding number of episodes to replay length"
                    );
                }
                entries.len()
            }
            _ => requested,
        }
    }

    pub fn plan(&self) -> &IgnitionPlan {
        &self.plan
    }
}
