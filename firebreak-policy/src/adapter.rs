//! Policy adapter - one selection contract over every policy family
//!
//! Dispatch is resolved once at construction into a tagged `PolicyHandle`;
//! the step loop never re-inspects algorithm identifiers, and mask
//! awareness is a capability flag fixed at load time.

use std::path::Path;

use firebreak_core::{EvalError, FireEnvironment, Observation, ObservationKind};

use crate::artifact::{LearnedFamily, Predictor};
use crate::scripted::{ScriptedKind, ScriptedRule};

/// Parsed algorithm identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Scripted(ScriptedKind),
    Learned(LearnedFamily),
}

impl Algorithm {
    /// Parse a raw identifier; unknown ids are a configuration error.
    pub fn parse(id: &str) -> Result<Self, EvalError> {
        if let Some(family) = LearnedFamily::parse(id) {
            return Ok(Algorithm::Learned(family));
        }
        match id {
            "none" => Ok(Algorithm::Scripted(ScriptedKind::NoOp)),
            "random" => Ok(Algorithm::Scripted(ScriptedKind::Random)),
            "naive" => Ok(Algorithm::Scripted(ScriptedKind::Naive)),
            "supplied" => Ok(Algorithm::Scripted(ScriptedKind::Supplied)),
            other => Err(EvalError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// Whether this identifier names a learned family that loads an
    /// artifact from disk.
    pub fn requires_loading(id: &str) -> bool {
        LearnedFamily::parse(id).is_some()
    }
}

/// A policy bound to its selection capability.
#[derive(Clone, Debug)]
pub enum PolicyHandle {
    Scripted(ScriptedRule),
    Learned {
        predictor: Predictor,
        /// Resolved once here, never re-checked in the step loop
        mask_aware: bool,
    },
}

/// Uniform `select_action` wrapper the episode runner drives.
#[derive(Clone, Debug)]
pub struct PolicyAdapter {
    id: String,
    handle: PolicyHandle,
}

impl PolicyAdapter {
    /// Build an adapter from an algorithm identifier.
    ///
    /// Scripted identifiers need no artifact; learned identifiers require
    /// `artifact_path` to reference an existing file.
    pub fn new(id: &str, artifact_path: Option<&Path>, seed: u64) -> Result<Self, EvalError> {
        let handle = match Algorithm::parse(id)? {
            Algorithm::Scripted(kind) => PolicyHandle::Scripted(ScriptedRule::new(kind, seed)),
            Algorithm::Learned(family) => {
                let path = artifact_path
                    .ok_or_else(|| EvalError::MissingArtifact(Path::new("<unset>").into()))?;
                let predictor = Predictor::load(path, family)?;
                PolicyHandle::Learned {
                    predictor,
                    mask_aware: family.mask_aware(),
                }
            }
        };
        Ok(Self {
            id: id.to_string(),
            handle,
        })
    }

    /// Wrap an already-built scripted rule (e.g. a supplied action queue).
    pub fn from_scripted(id: &str, rule: ScriptedRule) -> Self {
        Self {
            id: id.to_string(),
            handle: PolicyHandle::Scripted(rule),
        }
    }

    /// Wrap an in-memory predictor (tests, tooling).
    pub fn from_predictor(predictor: Predictor) -> Self {
        let family = predictor.family();
        Self {
            id: family.id().to_string(),
            handle: PolicyHandle::Learned {
                predictor,
                mask_aware: family.mask_aware(),
            },
        }
    }

    /// The raw algorithm identifier this adapter was built from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Observation representation the policy requires, if it differs from
    /// the environment default.
    pub fn observation_kind(&self) -> Option<ObservationKind> {
        match &self.handle {
            PolicyHandle::Scripted(_) => None,
            PolicyHandle::Learned { predictor, .. } => Some(predictor.observation_kind()),
        }
    }

    /// Select one discrete action for the current observation.
    ///
    /// Learned policies predict deterministically (evaluation, not
    /// training); mask-aware policies receive the current action-validity
    /// mask computed from the environment.
    pub fn select_action(
        &mut self,
        env: &mut dyn FireEnvironment,
        obs: &Observation,
    ) -> Result<usize, EvalError> {
        let action = match &mut self.handle {
            PolicyHandle::Scripted(rule) => rule.select(env, obs),
            PolicyHandle::Learned {
                predictor,
                mask_aware: true,
            } => {
                let masks = env.action_mask();
                predictor.predict(obs, true, Some(&masks))?
            }
            PolicyHandle::Learned { predictor, .. } => predictor.predict(obs, true, None)?,
        };
        Ok(action)
    }
}
