use thiserror::Error;

/// Everything that can end a single classification request.
///
/// None of these stop the application: the core turns each one into a
/// visible failure on the display and waits for the next tap.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("No usable image: {0}")]
    CaptureUnavailable(String),

    #[error("Model failed to load: {0}")]
    ModelInit(String),

    #[error("Classification failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    MalformedResult(String),
}
