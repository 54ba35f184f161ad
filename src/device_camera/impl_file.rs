use crate::device_camera::interface::{CaptureOutcome, DeviceCamera, Permission};
use crate::library::logger::interface::Logger;
use crate::preprocess::CapturedImage;
use std::path::PathBuf;
use std::sync::Arc;

/// "Takes" a photo by reading an image file from disk.
///
/// Permission is granted when the file is readable. A missing file counts as
/// a cancelled capture rather than an error.
pub struct DeviceCameraFile {
    path: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFile {
    pub fn new(path: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            path,
            logger: logger.with_namespace("camera").with_namespace("file"),
        }
    }
}

impl DeviceCamera for DeviceCameraFile {
    fn permission(&self) -> Permission {
        match std::fs::metadata(&self.path) {
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Permission::Denied,
            _ => Permission::Granted,
        }
    }

    fn request_permission(&self) -> Result<Permission, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.warn(&format!(
            "Read access to {} must be granted outside the app",
            self.path.display()
        ))?;
        Ok(self.permission())
    }

    fn capture(&self) -> Result<CaptureOutcome, Box<dyn std::error::Error + Send + Sync>> {
        if !self.path.exists() {
            self.logger
                .warn(&format!("{} does not exist", self.path.display()))?;
            return Ok(CaptureOutcome::Cancelled);
        }

        self.logger
            .info(&format!("Loading {}", self.path.display()))?;
        let image = image::open(&self.path)
            .map_err(|e| format!("failed to decode {}: {}", self.path.display(), e))?;

        if image.width() == 0 || image.height() == 0 {
            return Ok(CaptureOutcome::Unavailable);
        }

        Ok(CaptureOutcome::Captured(CapturedImage::new(image)))
    }
}
