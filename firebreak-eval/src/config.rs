//! Evaluation run configuration

use std::path::PathBuf;
use std::time::Duration;

use firebreak_core::EvalError;

/// Configuration for one evaluation run.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Fire map identifier (e.g. `Sub40x40`)
    pub map: String,
    /// Algorithm identifier the adapter was built from
    pub algo: String,
    /// Action space type label, recorded with results
    pub action_space: String,
    /// Reward function identifier, recorded with results
    pub reward_func: String,
    /// Requested episode count (a replay plan may override it)
    pub num_episodes: usize,
    /// Skip video capture entirely
    pub disable_video: bool,
    /// Skip live rendering
    pub disable_render: bool,
    /// Capture an rgb frame per step (plus one at reset) into the outcome
    pub parallel_capture: bool,
    /// Human-pacing delay applied after each step; never reflected in
    /// recorded metrics or captured frames
    pub step_delay: Option<Duration>,
    /// Output directory for the results artifact
    pub output_dir: PathBuf,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            map: "Sub40x40".to_string(),
            algo: "naive".to_string(),
            action_space: "flat".to_string(),
            reward_func: "FireSizeReward".to_string(),
            num_episodes: 20,
            disable_video: true,
            disable_render: true,
            parallel_capture: false,
            step_delay: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl EvalConfig {
    pub fn new(map: &str, algo: &str) -> Self {
        Self {
            map: map.to_string(),
            algo: algo.to_string(),
            ..Default::default()
        }
    }

    pub fn with_episodes(mut self, num_episodes: usize) -> Self {
        self.num_episodes = num_episodes;
        self
    }

    pub fn with_video(mut self, enabled: bool) -> Self {
        self.disable_video = !enabled;
        self
    }

    pub fn with_render(mut self, enabled: bool) -> Self {
        self.disable_render = !enabled;
        self
    }

    pub fn with_parallel_capture(mut self, enabled: bool) -> Self {
        self.parallel_capture = enabled;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Fail fast on misconfiguration, before any environment reset.
    ///
    /// Capture depends on rendering being meaningful: video with
    /// rendering disabled is rejected, and so is parallel frame capture
    /// with video disabled. Both are caught here rather than partway
    /// through a run.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.num_episodes < 1 {
            return Err(EvalError::NoEpisodes);
        }
        if self.disable_render && !self.disable_video {
            return Err(EvalError::VideoWithoutRender);
        }
        if self.disable_video && self.parallel_capture {
            return Err(EvalError::CaptureWithoutVideo);
        }
        Ok(())
    }

    /// Output directory, preferring a transient temp dir when the
    /// environment provides one.
    pub fn resolve_output_dir(&self) -> PathBuf {
        match std::env::var_os("TMPDIR") {
            Some(dir) => PathBuf::from(dir),
            None => self.output_dir.clone(),
        }
    }
}
