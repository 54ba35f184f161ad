use crate::device_display::interface::{DeviceDisplay, TextRegion};
use image::DynamicImage;
use std::collections::HashMap;
use std::error::Error;

/// Keeps whatever was last written so tests can read the screen back.
#[derive(Debug, Default)]
pub struct DeviceDisplayFake {
    pub texts: HashMap<TextRegion, String>,
    pub image: Option<DynamicImage>,
    pub clears: usize,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, region: TextRegion) -> &str {
        self.texts.get(&region).map(String::as_str).unwrap_or("")
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.texts.clear();
        self.image = None;
        self.clears += 1;
        Ok(())
    }

    fn write_text(
        &mut self,
        region: TextRegion,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.texts.insert(region, text.to_string());
        Ok(())
    }

    fn show_image(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.image = Some(image.clone());
        Ok(())
    }
}
