use crate::currency_detector::core::State;
use crate::device_display::interface::{DeviceDisplay, TextRegion};
use std::sync::{Arc, Mutex};

pub const PROMPT: &str = "Tap the button to scan a note";

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().map_err(|e| e.to_string())?;

        match state {
            State::Ready { message } => {
                device_display.clear()?;
                device_display.write_text(TextRegion::Result, PROMPT)?;
                device_display
                    .write_text(TextRegion::Confidence, message.as_deref().unwrap_or(""))?;
            }
            State::CheckingPermission | State::RequestingPermission => {
                device_display.write_text(TextRegion::Result, "Waiting for camera access...")?;
                device_display.write_text(TextRegion::Confidence, "")?;
            }
            State::Capturing => {
                device_display.write_text(TextRegion::Result, "Capturing...")?;
                device_display.write_text(TextRegion::Confidence, "")?;
            }
            State::Classifying { thumbnail } => {
                device_display.show_image(thumbnail)?;
                device_display.write_text(TextRegion::Result, "Classifying...")?;
                device_display.write_text(TextRegion::Confidence, "")?;
            }
            State::Showing { thumbnail, result } => {
                device_display.show_image(thumbnail)?;
                device_display.write_text(TextRegion::Result, &result.label())?;
                device_display.write_text(TextRegion::Confidence, &result.confidence_report())?;
            }
            State::Failed { error, thumbnail } => {
                match thumbnail {
                    Some(thumbnail) => device_display.show_image(thumbnail)?,
                    None => device_display.clear()?,
                }
                device_display.write_text(TextRegion::Result, "Could not classify")?;
                device_display.write_text(TextRegion::Confidence, &error.to_string())?;
            }
            State::Closed => {
                device_display.clear()?;
            }
        }

        Ok(())
    }
}
