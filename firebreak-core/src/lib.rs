//! FIREBREAK Core - Data model and simulation contracts
//!
//! This crate provides the shared foundation for policy evaluation:
//! - Ignition point data model and replay-file I/O
//! - Map catalog (fixed ignition sites, step-timing defaults)
//! - The environment contract the harness consumes
//! - Error taxonomy
//! - The native simulator process boundary

pub mod env;
pub mod error;
pub mod ignition;
pub mod map;
pub mod process;

// Re-exports for convenient access
pub use env::{FireEnvironment, Frame, Observation, ObservationKind, RenderMode, StepOutcome};
pub use error::EvalError;
pub use ignition::{load_replay_file, write_replay_file, IgnitionPoint, IgnitionPoints};
pub use map::{MapCatalog, MapProfile};
pub use process::SimulatorCommand;
