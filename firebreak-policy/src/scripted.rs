//! Scripted baselines - stateless or minimally-stateful rules

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use firebreak_core::{FireEnvironment, Observation};

/// Which scripted baseline to instantiate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptedKind {
    /// Never take a containment action
    NoOp,
    /// Uniform over currently legal actions
    Random,
    /// Always act on the highest-risk cell
    Naive,
    /// Replay an externally supplied action sequence
    Supplied,
}

/// A scripted decision rule.
///
/// Rules read the environment for legality and risk but hold no learned
/// parameters; `Random` carries a seeded rng, `Supplied` a queue.
#[derive(Clone, Debug)]
pub enum ScriptedRule {
    NoOp,
    Random(ChaCha8Rng),
    Naive,
    Supplied(VecDeque<usize>),
}

impl ScriptedRule {
    pub fn new(kind: ScriptedKind, seed: u64) -> Self {
        match kind {
            ScriptedKind::NoOp => ScriptedRule::NoOp,
            ScriptedKind::Random => ScriptedRule::Random(ChaCha8Rng::seed_from_u64(seed)),
            ScriptedKind::Naive => ScriptedRule::Naive,
            ScriptedKind::Supplied => ScriptedRule::Supplied(VecDeque::new()),
        }
    }

    /// Build a pass-through rule over a fixed action sequence.
    pub fn supplied(actions: impl IntoIterator<Item = usize>) -> Self {
        ScriptedRule::Supplied(actions.into_iter().collect())
    }

    /// Select the next action for the current state.
    pub fn select(&mut self, env: &dyn FireEnvironment, obs: &Observation) -> usize {
        match self {
            ScriptedRule::NoOp => env.noop_action(),
            ScriptedRule::Random(rng) => {
                let mask = env.action_mask();
                let legal: Vec<usize> = mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &ok)| ok.then_some(i))
                    .collect();
                if legal.is_empty() {
                    env.noop_action()
                } else {
                    legal[rng.gen_range(0..legal.len())]
                }
            }
            ScriptedRule::Naive => highest_risk_action(env, obs),
            ScriptedRule::Supplied(queue) => queue.pop_front().unwrap_or_else(|| env.noop_action()),
        }
    }
}

/// Pick the legal action over the cell with the highest observed fire
/// intensity; falls back to no-op when no cell-directed action is legal.
fn highest_risk_action(env: &dyn FireEnvironment, obs: &Observation) -> usize {
    let mask = env.action_mask();
    let mut best: Option<(usize, f32)> = None;
    for (action, &ok) in mask.iter().enumerate() {
        if !ok || action == env.noop_action() {
            continue;
        }
        let risk = obs.values.get(action).copied().unwrap_or(0.0);
        match best {
            Some((_, top)) if top >= risk => {}
            _ => best = Some((action, risk)),
        }
    }
    best.map(|(action, _)| action).unwrap_or_else(|| env.noop_action())
}
