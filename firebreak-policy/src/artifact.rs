//! Learned policy artifacts - loading and prediction
//!
//! A trained policy is persisted as a JSON artifact declaring its
//! algorithm family, required observation representation, and linear
//! score weights. The predictor is opaque to the harness: it only sees
//! `predict`.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use firebreak_core::{EvalError, Observation, ObservationKind};

/// Algorithm families with loadable artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LearnedFamily {
    A2c,
    Ppo,
    Trpo,
    Dqn,
    /// PPO variant that consumes an action-validity mask per prediction
    MaskablePpo,
}

impl LearnedFamily {
    /// Parse an algorithm identifier; `None` for ids outside the family set.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "a2c" => Some(LearnedFamily::A2c),
            "ppo" => Some(LearnedFamily::Ppo),
            "trpo" => Some(LearnedFamily::Trpo),
            "dqn" => Some(LearnedFamily::Dqn),
            "ppo-maskable" => Some(LearnedFamily::MaskablePpo),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            LearnedFamily::A2c => "a2c",
            LearnedFamily::Ppo => "ppo",
            LearnedFamily::Trpo => "trpo",
            LearnedFamily::Dqn => "dqn",
            LearnedFamily::MaskablePpo => "ppo-maskable",
        }
    }

    /// Whether predictions require an action-validity mask.
    pub fn mask_aware(&self) -> bool {
        matches!(self, LearnedFamily::MaskablePpo)
    }
}

/// On-disk representation of a trained policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyArtifact {
    /// Declared algorithm family id (e.g. `ppo`)
    pub algorithm: String,
    /// Observation representation the policy was trained on
    pub observation: ObservationKind,
    /// Per-action score weights, one row per discrete action
    pub weights: Vec<Vec<f32>>,
    /// Per-action bias
    pub bias: Vec<f32>,
}

/// A loaded predictor bound to its declared algorithm family.
#[derive(Clone, Debug)]
pub struct Predictor {
    family: LearnedFamily,
    artifact: PolicyArtifact,
    rng: ChaCha8Rng,
}

impl Predictor {
    /// Load an artifact from disk, validating existence and family.
    pub fn load(path: &Path, family: LearnedFamily) -> Result<Self, EvalError> {
        if !path.exists() {
            return Err(EvalError::MissingArtifact(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let artifact: PolicyArtifact =
            serde_json::from_str(&content).map_err(|source| EvalError::MalformedArtifact {
                path: path.to_path_buf(),
                source,
            })?;
        if artifact.algorithm != family.id() {
            return Err(EvalError::ArtifactFamilyMismatch {
                path: path.to_path_buf(),
                found: artifact.algorithm,
                requested: family.id().to_string(),
            });
        }
        Ok(Self {
            family,
            artifact,
            rng: ChaCha8Rng::seed_from_u64(0),
        })
    }

    /// Build directly from an in-memory artifact (tests, tooling).
    pub fn from_artifact(artifact: PolicyArtifact, family: LearnedFamily) -> Self {
        Self {
            family,
            artifact,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    pub fn family(&self) -> LearnedFamily {
        self.family
    }

    /// Observation representation this policy expects.
    pub fn observation_kind(&self) -> ObservationKind {
        self.artifact.observation
    }

    /// Predict a discrete action for an observation.
    ///
    /// Masked-out actions are excluded before selection, so the result's
    /// mask entry is never false; a mask with no legal action at all is
    /// rejected rather than letting selection fall through to an illegal
    /// index. Deterministic mode is argmax over scores; stochastic mode
    /// softmax-samples (evaluation always runs deterministic).
    pub fn predict(
        &mut self,
        obs: &Observation,
        deterministic: bool,
        action_masks: Option<&[bool]>,
    ) -> Result<usize, EvalError> {
        if let Some(masks) = action_masks {
            if !masks.iter().any(|&ok| ok) {
                return Err(EvalError::NoLegalAction);
            }
        }
        let scores = self.scores(obs, action_masks);
        let action = if deterministic {
            argmax(&scores)
        } else {
            self.sample_softmax(&scores)
        };
        Ok(action)
    }

    fn scores(&self, obs: &Observation, action_masks: Option<&[bool]>) -> Vec<f32> {
        let mut scores: Vec<f32> = self
            .artifact
            .weights
            .iter()
            .zip(self.artifact.bias.iter())
            .map(|(row, bias)| {
                row.iter()
                    .zip(obs.values.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f32>()
                    + bias
            })
            .collect();
        if let Some(masks) = action_masks {
            for (score, &ok) in scores.iter_mut().zip(masks.iter()) {
                if !ok {
                    *score = f32::NEG_INFINITY;
                }
            }
        }
        scores
    }

    fn sample_softmax(&mut self, scores: &[f32]) -> usize {
        let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let weights: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return argmax(scores);
        }
        let mut draw = self.rng.gen_range(0.0..total);
        for (i, w) in weights.iter().enumerate() {
            if draw < *w {
                return i;
            }
            draw -= w;
        }
        argmax(scores)
    }
}

fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

/// Write an artifact to disk (tooling and tests).
pub fn write_artifact(path: &Path, artifact: &PolicyArtifact) -> Result<(), EvalError> {
    let content = serde_json::to_string_pretty(artifact).map_err(std::io::Error::other)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Uniform-weight artifact for a given action space (testing aid).
pub fn uniform_artifact(family: LearnedFamily, actions: usize, obs_dim: usize) -> PolicyArtifact {
    PolicyArtifact {
        algorithm: family.id().to_string(),
        observation: ObservationKind::Features,
        weights: vec![vec![0.0; obs_dim]; actions],
        bias: vec![0.0; actions],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}", name, std::process::id()))
    }

    fn biased_artifact(family: LearnedFamily) -> PolicyArtifact {
        PolicyArtifact {
            algorithm: family.id().to_string(),
            observation: ObservationKind::Features,
            weights: vec![vec![0.0; 3]; 4],
            bias: vec![0.0, 0.0, 1.0, 0.5],
        }
    }

    #[test]
    fn test_family_parse() {
        assert_eq!(LearnedFamily::parse("ppo"), Some(LearnedFamily::Ppo));
        assert_eq!(
            LearnedFamily::parse("ppo-maskable"),
            Some(LearnedFamily::MaskablePpo)
        );
        assert_eq!(LearnedFamily::parse("naive"), None);
        assert!(LearnedFamily::MaskablePpo.mask_aware());
        assert!(!LearnedFamily::Dqn.mask_aware());
    }

    #[test]
    fn test_missing_artifact() {
        let err = Predictor::load(Path::new("/nonexistent/model.json"), LearnedFamily::Ppo)
            .unwrap_err();
        assert!(matches!(err, EvalError::MissingArtifact(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_family_mismatch() {
        let path = temp_path("model_dqn.json");
        write_artifact(&path, &biased_artifact(LearnedFamily::Dqn)).unwrap();
        let err = Predictor::load(&path, LearnedFamily::Ppo).unwrap_err();
        assert!(matches!(err, EvalError::ArtifactFamilyMismatch { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_and_predict_deterministic() {
        let path = temp_path("model_ppo.json");
        write_artifact(&path, &biased_artifact(LearnedFamily::Ppo)).unwrap();
        let mut predictor = Predictor::load(&path, LearnedFamily::Ppo).unwrap();

        let obs = Observation::features(vec![0.0; 3]);
        // Bias peaks at action 2
        assert_eq!(predictor.predict(&obs, true, None).unwrap(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_mask_excludes_best_action() {
        let mut predictor =
            Predictor::from_artifact(biased_artifact(LearnedFamily::MaskablePpo), LearnedFamily::MaskablePpo);
        let obs = Observation::features(vec![0.0; 3]);
        let masks = vec![true, true, false, true];
        let action = predictor.predict(&obs, true, Some(&masks)).unwrap();
        assert!(masks[action]);
        assert_eq!(action, 3);
    }

    #[test]
    fn test_masked_prediction_never_illegal() {
        let mut predictor =
            Predictor::from_artifact(biased_artifact(LearnedFamily::MaskablePpo), LearnedFamily::MaskablePpo);
        let obs = Observation::features(vec![0.3, -0.2, 0.7]);
        for legal in 0..4usize {
            let mut masks = vec![false; 4];
            masks[legal] = true;
            for deterministic in [true, false] {
                let action = predictor.predict(&obs, deterministic, Some(&masks)).unwrap();
                assert_eq!(action, legal);
            }
        }
    }

    #[test]
    fn test_all_masked_actions_rejected() {
        let mut predictor = Predictor::from_artifact(
            biased_artifact(LearnedFamily::MaskablePpo),
            LearnedFamily::MaskablePpo,
        );
        let obs = Observation::features(vec![0.3, -0.2, 0.7]);
        let masks = vec![false; 4];
        for deterministic in [true, false] {
            let err = predictor
                .predict(&obs, deterministic, Some(&masks))
                .unwrap_err();
            assert!(matches!(err, EvalError::NoLegalAction));
        }
    }
}
