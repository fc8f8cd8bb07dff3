//! Error taxonomy for evaluation runs

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the evaluation harness and its collaborators.
///
/// Configuration errors are detected at construction time wherever
/// possible; runtime errors abort the whole run rather than skipping
/// the failed episode, so a result set always represents exactly the
/// evaluation that was requested.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Algorithm identifier not in the supported set
    #[error("algorithm `{0}` is not supported")]
    UnknownAlgorithm(String),

    /// Learned policy requested without a usable artifact on disk
    #[error("model path {0} does not exist")]
    MissingArtifact(PathBuf),

    /// Artifact on disk was produced by a different algorithm family
    #[error("artifact {path} declares family `{found}` but `{requested}` was requested")]
    ArtifactFamilyMismatch {
        path: PathBuf,
        found: String,
        requested: String,
    },

    /// Replay file name does not carry the requested map as its prefix
    #[error("ignition file `{file}` does not match map `{map}`")]
    IgnitionMapMismatch { file: String, map: String },

    /// Fixed ignition requested for a map with no registered point set
    #[error("map `{0}` has no registered fixed ignition points")]
    NoFixedIgnition(String),

    /// Replay file could not be parsed
    #[error("malformed ignition file {path}: {source}")]
    MalformedIgnitionFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Ignition type is not `random`, `fixed`, or a replay file path
    #[error("ignition type `{0}` is not supported")]
    UnknownIgnitionType(String),

    /// Policy artifact could not be parsed
    #[error("malformed policy artifact {path}: {source}")]
    MalformedArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Ignition point collections must hold at least one point
    #[error("ignition point list must not be empty")]
    EmptyIgnition,

    /// Video capture assumes rendering is meaningful
    #[error("video recording requires rendering to be enabled")]
    VideoWithoutRender,

    /// Parallel frame capture assumes the video artifact is wanted
    #[error("parallel frame capture requires video recording to be enabled")]
    CaptureWithoutVideo,

    /// A run must evaluate at least one episode
    #[error("must have at least one evaluation episode")]
    NoEpisodes,

    /// Episode terminated before any step produced a reward
    #[error("episode {0} reached a terminal state without observing a reward")]
    EmptyEpisode(usize),

    /// The action-validity mask marked every action illegal
    #[error("action mask leaves no legal action to select")]
    NoLegalAction,

    /// The native fire-spread process exited abnormally
    #[error("simulator exited with status {status}; see log at {log}")]
    SimulatorFailed { status: i32, log: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EvalError {
    /// True for user/input misconfiguration (as opposed to runtime or
    /// external-process failures).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EvalError::UnknownAlgorithm(_)
                | EvalError::MissingArtifact(_)
                | EvalError::ArtifactFamilyMismatch { .. }
                | EvalError::IgnitionMapMismatch { .. }
                | EvalError::NoFixedIgnition(_)
                | EvalError::MalformedIgnitionFile { .. }
                | EvalError::MalformedArtifact { .. }
                | EvalError::UnknownIgnitionType(_)
                | EvalError::EmptyIgnition
                | EvalError::VideoWithoutRender
                | EvalError::CaptureWithoutVideo
                | EvalError::NoEpisodes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(EvalError::NoEpisodes.is_configuration());
        assert!(EvalError::VideoWithoutRender.is_configuration());
        assert!(EvalError::CaptureWithoutVideo.is_configuration());
        assert!(EvalError::UnknownAlgorithm("sac".into()).is_configuration());
        assert!(!EvalError::EmptyEpisode(0).is_configuration());
        assert!(!EvalError::NoLegalAction.is_configuration());
        assert!(!EvalError::SimulatorFailed {
            status: 1,
            log: PathBuf::from("/tmp/LogFile.txt"),
        }
        .is_configuration());
    }

    #[test]
    fn test_messages_name_the_precondition() {
        let err = EvalError::IgnitionMapMismatch {
            file: "Sub20x20_points.json".into(),
            map: "Sub40x40".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Sub20x20_points.json"));
        assert!(msg.contains("Sub40x40"));
    }
}
