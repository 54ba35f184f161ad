use crate::device_camera::interface::{CaptureOutcome, DeviceCamera, Permission};
use crate::library::logger::interface::Logger;
use crate::preprocess::CapturedImage;
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum FakeCapture {
    /// A random-noise photo of the given size.
    Noise { width: u32, height: u32 },
    #[cfg(test)]
    Outcome(CaptureOutcome),
    #[cfg(test)]
    Fail(String),
}

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    granted: AtomicBool,
    grant_on_request: bool,
    next: Mutex<FakeCapture>,
    capture_delay: Duration,
    captures: AtomicUsize,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            granted: AtomicBool::new(true),
            grant_on_request: true,
            next: Mutex::new(FakeCapture::Noise {
                width: 640,
                height: 480,
            }),
            capture_delay: Duration::from_millis(300),
            captures: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn with_permission(mut self, granted: bool, grant_on_request: bool) -> Self {
        self.granted = AtomicBool::new(granted);
        self.grant_on_request = grant_on_request;
        self
    }

    #[cfg(test)]
    pub fn with_capture(self, capture: FakeCapture) -> Self {
        Self {
            next: Mutex::new(capture),
            ..self
        }
    }

    #[cfg(test)]
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    #[cfg(test)]
    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    fn noise(width: u32, height: u32) -> CapturedImage {
        let mut rng = rand::rng();
        let img = ImageBuffer::from_fn(width, height, |_, _| {
            Rgb([rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>()])
        });
        CapturedImage::new(DynamicImage::ImageRgb8(img))
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn permission(&self) -> Permission {
        if self.granted.load(Ordering::SeqCst) {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn request_permission(&self) -> Result<Permission, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Requesting camera permission...")?;
        if self.grant_on_request {
            self.granted.store(true, Ordering::SeqCst);
        }
        let permission = self.permission();
        self.logger.info(&format!("Permission: {:?}", permission))?;
        Ok(permission)
    }

    fn capture(&self) -> Result<CaptureOutcome, Box<dyn std::error::Error + Send + Sync>> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        self.logger.info("Capturing photo...")?;
        std::thread::sleep(self.capture_delay);

        let next = self.next.lock().map_err(|e| e.to_string())?.clone();
        let outcome = match next {
            FakeCapture::Noise { width, height } => {
                CaptureOutcome::Captured(Self::noise(width, height))
            }
            #[cfg(test)]
            FakeCapture::Outcome(outcome) => outcome,
            #[cfg(test)]
            FakeCapture::Fail(message) => return Err(message.into()),
        };

        self.logger.info("Photo captured")?;
        Ok(outcome)
    }
}
