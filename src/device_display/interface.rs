use image::DynamicImage;
use std::error::Error;

/// The two text areas on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRegion {
    /// Winning denomination, or a status message.
    Result,
    /// Per-class confidence report.
    Confidence,
}

/// The single application screen: two text regions and one image region.
pub trait DeviceDisplay: Send + Sync {
    /// Blank both text regions and the image.
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn write_text(
        &mut self,
        region: TextRegion,
        text: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_image(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>>;
}
