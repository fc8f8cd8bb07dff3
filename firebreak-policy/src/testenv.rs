//! Minimal static environment used by unit tests in this crate.

use rustc_hash::FxHashMap;

use firebreak_core::{
    EvalError, FireEnvironment, Frame, IgnitionPoints, Observation, ObservationKind, RenderMode,
    StepOutcome,
};

/// Environment stub with a fixed action space and a settable mask.
pub struct StaticEnv {
    pub actions: usize,
    pub mask: Vec<bool>,
    pub observation_kind: ObservationKind,
}

impl StaticEnv {
    pub fn new(actions: usize) -> Self {
        Self {
            actions,
            mask: vec![true; actions],
            observation_kind: ObservationKind::Features,
        }
    }
}

impl FireEnvironment for StaticEnv {
    fn reset(&mut self, _ignition: Option<&IgnitionPoints>) -> Result<Observation, EvalError> {
        Ok(Observation {
            kind: self.observation_kind,
            values: vec![0.0; self.actions],
        })
    }

    fn step(&mut self, _action: usize) -> Result<StepOutcome, EvalError> {
        Ok(StepOutcome {
            observation: Observation {
                kind: self.observation_kind,
                values: vec![0.0; self.actions],
            },
            reward: 0.0,
            done: true,
            info: FxHashMap::default(),
        })
    }

    fn render(&mut self, _mode: RenderMode) -> Option<Frame> {
        None
    }

    fn close(&mut self) -> Result<(), EvalError> {
        Ok(())
    }

    fn action_count(&self) -> usize {
        self.actions
    }

    fn noop_action(&self) -> usize {
        self.actions - 1
    }

    fn action_mask(&self) -> Vec<bool> {
        self.mask.clone()
    }

    fn cells_harvested(&self) -> usize {
        0
    }

    fn cells_on_fire(&self) -> usize {
        0
    }

    fn cells_burned(&self) -> usize {
        0
    }

    fn steps_taken(&self) -> u32 {
        0
    }

    fn ignition_points(&self) -> Option<&IgnitionPoints> {
        None
    }

    fn set_observation_kind(&mut self, kind: ObservationKind) {
        self.observation_kind = kind;
    }
}
