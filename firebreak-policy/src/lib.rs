//! FIREBREAK Policy - Decision policies behind one contract
//!
//! This crate wraps heterogeneous policy back ends:
//! - Scripted baselines (no-op, random, highest-risk, supplied queue)
//! - Learned artifacts loaded from disk, including mask-aware variants
//!
//! The [`PolicyAdapter`] exposes a single `select_action` call so the
//! episode runner stays agnostic to which family is active.

mod adapter;
mod artifact;
mod scripted;

#[cfg(test)]
mod testenv;

pub use adapter::{Algorithm, PolicyAdapter, PolicyHandle};
pub use artifact::{uniform_artifact, write_artifact, LearnedFamily, PolicyArtifact, Predictor};
pub use scripted::{ScriptedKind, ScriptedRule};
