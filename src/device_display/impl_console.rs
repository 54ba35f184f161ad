use crate::device_display::interface::{DeviceDisplay, TextRegion};
use image::DynamicImage;
use std::error::Error;

const WIDTH: usize = 32;

/// Draws the screen as a box on stdout after every change.
pub struct DeviceDisplayConsole {
    result: String,
    confidence: String,
    image: Option<(u32, u32)>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            result: String::new(),
            confidence: String::new(),
            image: None,
        }
    }

    fn frame(&self) -> String {
        let border = "─".repeat(WIDTH);
        let mut out = format!("┌{}┐\n", border);

        let image_line = match self.image {
            Some((w, h)) => format!("[photo {}x{}]", w, h),
            None => "[no photo]".to_string(),
        };
        out.push_str(&Self::row(&image_line));
        out.push_str(&Self::row(&self.result));
        out.push_str(&format!("├{}┤\n", border));
        for line in self.confidence.lines() {
            out.push_str(&Self::row(line));
        }
        out.push_str(&format!("└{}┘", border));
        out
    }

    fn row(text: &str) -> String {
        let clipped: String = text.chars().take(WIDTH).collect();
        let padding = WIDTH - clipped.chars().count();
        format!("│{}{}│\n", clipped, " ".repeat(padding))
    }

    fn render_display(&self) {
        println!("{}", self.frame());
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.result.clear();
        self.confidence.clear();
        self.image = None;
        Ok(())
    }

    fn write_text(
        &mut self,
        region: TextRegion,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match region {
            TextRegion::Result => self.result = text.to_string(),
            TextRegion::Confidence => {
                self.confidence = text.to_string();
                // the report is the last thing written for a result
                self.render_display();
            }
        }
        Ok(())
    }

    fn show_image(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.image = Some((image.width(), image.height()));
        Ok(())
    }
}
