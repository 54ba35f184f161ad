use crate::device_camera::interface::{CaptureOutcome, DeviceCamera, Permission};
use crate::library::logger::interface::Logger;
use crate::preprocess::CapturedImage;
use image::{DynamicImage, ImageBuffer, Rgb};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Grabs one frame from a local webcam per capture.
///
/// The device is opened for the capture and released straight after, like a
/// camera app that is launched for a single shot.
pub struct DeviceCameraWebcam {
    device_index: u32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraWebcam {
    pub fn new(device_index: u32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            device_index,
            logger: logger.with_namespace("camera").with_namespace("webcam"),
        }
    }
}

impl DeviceCamera for DeviceCameraWebcam {
    fn permission(&self) -> Permission {
        if nokhwa::nokhwa_check() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn request_permission(&self) -> Result<Permission, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Requesting camera permission...")?;
        let (tx, rx) = mpsc::channel();
        nokhwa::nokhwa_initialize(move |granted| {
            let _ = tx.send(granted);
        });
        let granted = rx.recv_timeout(Duration::from_secs(30)).unwrap_or(false);
        Ok(if granted {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }

    fn capture(&self) -> Result<CaptureOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.device_index), requested)
            .map_err(|e| format!("failed to open webcam {}: {}", self.device_index, e))?;

        camera
            .open_stream()
            .map_err(|e| format!("failed to open webcam stream: {}", e))?;

        let frame = camera.frame();
        if let Err(e) = camera.stop_stream() {
            self.logger
                .warn(&format!("Failed to stop webcam stream: {}", e))?;
        }
        let frame = frame.map_err(|e| format!("failed to capture webcam frame: {}", e))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| format!("failed to decode webcam frame: {}", e))?;
        let (width, height) = (decoded.width(), decoded.height());

        self.logger
            .info(&format!("Captured {}x{} frame", width, height))?;

        let rgb: Option<ImageBuffer<Rgb<u8>, Vec<u8>>> =
            ImageBuffer::from_raw(width, height, decoded.into_raw());

        Ok(match rgb {
            Some(rgb) if width > 0 && height > 0 => {
                CaptureOutcome::Captured(CapturedImage::new(DynamicImage::ImageRgb8(rgb)))
            }
            _ => CaptureOutcome::Unavailable,
        })
    }
}
