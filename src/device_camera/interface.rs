use crate::preprocess::CapturedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// How a single capture interaction ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(CapturedImage),
    /// The user backed out of the capture.
    Cancelled,
    /// The capture finished but handed back no image data.
    Unavailable,
}

pub trait DeviceCamera {
    fn permission(&self) -> Permission;

    /// Asks for access. The answer only applies to later taps.
    fn request_permission(&self) -> Result<Permission, Box<dyn std::error::Error + Send + Sync>>;

    /// Blocks until the user has taken (or abandoned) one photo.
    fn capture(&self) -> Result<CaptureOutcome, Box<dyn std::error::Error + Send + Sync>>;
}
