//! Evaluation harness - orchestrates N episodes into one result set
//!
//! Pure orchestration: the harness owns no simulation state. Per episode
//! it resolves the ignition input, delegates to the episode runner, and
//! appends the returned metrics; the finished collection is handed to the
//! results sink exactly once at run end.

use chrono::Utc;
use tracing::info;

use firebreak_core::{EvalError, FireEnvironment};
use firebreak_policy::PolicyAdapter;

use crate::config::EvalConfig;
use crate::episode::{EpisodeOutcome, EpisodeRunner};
use crate::ignition_source::IgnitionSource;
use crate::recorder::{NullRecorder, VideoRecorder};
use crate::results::{EpisodeRecord, EvaluationRun, JsonResultsSink, ResultsSink, RunMetadata};

/// Drives a full evaluation run.
pub struct EvaluationHarness<E: FireEnvironment> {
    env: E,
    adapter: PolicyAdapter,
    source: IgnitionSource,
    config: EvalConfig,
    recorder: Box<dyn VideoRecorder>,
    sink: Box<dyn ResultsSink>,
}

impl<E: FireEnvironment> EvaluationHarness<E> {
    /// Build a harness with the default JSON sink and no video recorder.
    pub fn new(env: E, adapter: PolicyAdapter, source: IgnitionSource, config: EvalConfig) -> Self {
        let sink = Box::new(JsonResultsSink::new(config.resolve_output_dir()));
        Self {
            env,
            adapter,
            source,
            config,
            recorder: Box::new(NullRecorder),
            sink,
        }
    }

    /// Replace the video recorder (ignored unless video is enabled).
    pub fn with_recorder(mut self, recorder: Box<dyn VideoRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Replace the results sink.
    pub fn with_sink(mut self, sink: Box<dyn ResultsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the configured number of episodes (a replay plan may override
    /// it) and persist the result set.
    ///
    /// Preconditions are checked before the first environment reset, so a
    /// misconfigured run has no side effects. Any episode failure aborts
    /// the whole run; a partial result set is never persisted.
    pub fn run(mut self) -> Result<EvaluationRun, EvalError> {
        self.config.validate()?;

        if let Some(kind) = self.adapter.observation_kind() {
            self.env.set_observation_kind(kind);
            info!(?kind, "forcing observation representation for policy");
        }

        let num_episodes = self.source.episode_count(self.config.num_episodes);
        let runner = EpisodeRunner {
            parallel_capture: self.config.parallel_capture,
            live_render: !self.config.disable_render,
            record_video: !self.config.disable_video,
            step_delay: self.config.step_delay,
        };

        let mut run = EvaluationRun::new(RunMetadata {
            map: self.config.map.clone(),
            algo: self.config.algo.clone(),
            action_space: self.config.action_space.clone(),
            reward_func: self.config.reward_func.clone(),
            recorded_at: Utc::now(),
        });

        for episode_index in 0..num_episodes {
            let ignition = self.source.resolve(episode_index).cloned();
            let outcome = runner.run_episode(
                &mut self.env,
                &mut self.adapter,
                self.recorder.as_mut(),
                ignition.as_ref(),
                episode_index,
            )?;
            log_episode(episode_index, num_episodes, &outcome);
            run.push(EpisodeRecord::from(&outcome));
        }

        self.env.close()?;
        self.recorder.close();
        self.sink.persist(&run)?;
        Ok(run)
    }
}

fn log_episode(episode_index: usize, num_episodes: usize, outcome: &EpisodeOutcome) {
    info!(
        episode = episode_index + 1,
        total = num_episodes,
        final_reward = outcome.final_reward,
        accumulated_reward = outcome.accumulated_reward,
        steps = outcome.steps,
        cells_burned = outcome.cells_burned,
        "episode complete"
    );
}
