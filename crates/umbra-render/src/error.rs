use thiserror::Error;

use crate::gpu::SurfaceErrorAction;

/// Errors raised by the renderer, its registry and its graphics backends.
///
/// Draw-phase errors are not recovered locally: they end the current frame,
/// the loop driver logs them and the next refresh redraws from scratch.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `initialize` was called while another renderer is still installed.
    #[error("a renderer is already active; destroy() it before initializing again")]
    AlreadyInitialized,

    /// A draw or present was issued before the primary surface was cleared.
    #[error("no frame has been acquired from the primary surface")]
    NoActiveFrame,

    /// The primary surface could not provide a frame.
    #[error("surface unavailable ({0:?})")]
    Surface(SurfaceErrorAction),

    /// A refresh fired while the renderer was already running a frame.
    #[error("renderer is already running a frame")]
    Reentrant,

    /// Backend-specific failure.
    #[error("graphics backend failure: {0}")]
    Backend(String),

    /// Font bytes could not be parsed.
    #[error("font load error: {0}")]
    Font(String),
}

impl RenderError {
    /// Raised by the draw phase itself, as opposed to registry misuse.
    ///
    /// The registry logs frame faults before returning them.
    pub fn is_frame_fault(&self) -> bool {
        matches!(self, Self::NoActiveFrame | Self::Surface(_) | Self::Backend(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_misuse_is_not_a_frame_fault() {
        assert!(!RenderError::Reentrant.is_frame_fault());
        assert!(!RenderError::AlreadyInitialized.is_frame_fault());
        assert!(RenderError::Backend("lost".into()).is_frame_fault());
        assert!(RenderError::Surface(SurfaceErrorAction::SkipFrame).is_frame_fault());
    }
}
