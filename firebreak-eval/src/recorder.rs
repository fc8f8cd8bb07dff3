//! Video recorder seam
//!
//! Frame encoding is an external collaborator; the harness only hands it
//! one frame per step through this trait.

use firebreak_core::Frame;

/// Consumer of per-step frames for the video artifact.
pub trait VideoRecorder {
    /// Receive the frame rendered after the current step, if the
    /// environment produced one.
    fn capture(&mut self, frame: Option<Frame>);

    /// Finalize the artifact at run end.
    fn close(&mut self);
}

/// Recorder used when video is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl VideoRecorder for NullRecorder {
    fn capture(&mut self, _frame: Option<Frame>) {}

    fn close(&mut self) {}
}
