//! Episode runner - drives one episode from reset to terminal

use std::time::Duration;

use firebreak_core::{EvalError, FireEnvironment, Frame, IgnitionPoints, RenderMode};
use firebreak_policy::PolicyAdapter;

use crate::recorder::VideoRecorder;

/// Per-episode loop options, derived from the run configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EpisodeRunner {
    /// Collect an rgb frame per step (plus one at reset) into the outcome
    pub parallel_capture: bool,
    /// Render synchronously for a human watcher each step
    pub live_render: bool,
    /// Feed frames to the video recorder each step
    pub record_video: bool,
    /// Human-pacing delay after each step; metrics never see it
    pub step_delay: Option<Duration>,
}

/// Metrics of one completed episode.
#[derive(Clone, Debug)]
pub struct EpisodeOutcome {
    /// Sum of per-step rewards
    pub accumulated_reward: f64,
    /// Reward of the terminal step
    pub final_reward: f64,
    /// Actions taken before termination
    pub steps: u32,
    /// Cells under an active containment action at termination
    pub cells_harvested: usize,
    /// Cells still burning at termination
    pub cells_on_fire: usize,
    /// Cells burned out at termination
    pub cells_burned: usize,
    /// Simulated steps reported by the environment
    pub sim_steps: u32,
    /// Ignition points actually used this episode
    pub ignition_points: Option<IgnitionPoints>,
    /// Captured frames when parallel capture is on; always steps + 1
    pub frames: Vec<Frame>,
}

impl EpisodeRunner {
    /// Run one episode to its terminal state.
    ///
    /// Resets with the given ignition override (or none), then steps the
    /// adapter-selected actions until the environment reports done. An
    /// episode that terminates without ever observing a step reward is a
    /// fatal invariant violation, not a skippable condition.
    pub fn run_episode(
        &self,
        env: &mut dyn FireEnvironment,
        adapter: &mut PolicyAdapter,
        recorder: &mut dyn VideoRecorder,
        ignition: Option<&IgnitionPoints>,
        episode_index: usize,
    ) -> Result<EpisodeOutcome, EvalError> {
        let mut obs = env.reset(ignition)?;

        let mut frames = Vec::new();
        if self.parallel_capture {
            // Pre-action state first, so frames always cover reset too
            if let Some(frame) = env.render(RenderMode::RgbArray) {
                frames.push(frame);
            }
        }
        if self.live_render {
            env.render(RenderMode::Human);
        }

        let mut accumulated_reward = 0.0;
        let mut last_reward: Option<f64> = None;
        let mut steps = 0u32;
        let mut done = false;

        while !done {
            let action = adapter.select_action(env, &obs)?;
            let outcome = env.step(action)?;
            obs = outcome.observation;
            accumulated_reward += outcome.reward;
            last_reward = Some(outcome.reward);
            done = outcome.done;
            steps += 1;

            if self.parallel_capture {
                if let Some(frame) = env.render(RenderMode::RgbArray) {
                    frames.push(frame);
                }
            }
            if self.live_render {
                env.render(RenderMode::Human);
            }
            if self.record_video {
                recorder.capture(env.render(RenderMode::RgbArray));
            }
            if let Some(delay) = self.step_delay {
                std::thread::sleep(delay);
            }
        }

        let final_reward = last_reward.ok_or(EvalError::EmptyEpisode(episode_index))?;

        Ok(EpisodeOutcome {
            accumulated_reward,
            final_reward,
            steps,
            cells_harvested: env.cells_harvested(),
            cells_on_fire: env.cells_on_fire(),
            cells_burned: env.cells_burned(),
            sim_steps: env.steps_taken(),
            ignition_points: env.ignition_points().cloned(),
            frames,
        })
    }
}
