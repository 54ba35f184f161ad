//! Turns a captured photo into the tensor the currency model expects.
//!
//! The model takes a `(1, 224, 224, 3)` f32 tensor: row-major pixels, RGB
//! channels interleaved, every value scaled from `0..=255` to `[0, 1]`.

use crate::error::DetectionError;
use image::{imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};

pub const INPUT_SIZE: u32 = 224;
pub const CHANNELS: usize = 3;
pub const TENSOR_LEN: usize = (INPUT_SIZE as usize) * (INPUT_SIZE as usize) * CHANNELS;
pub const TENSOR_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS];

/// A photo straight from the camera, any size.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage(DynamicImage);

impl CapturedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self(image)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.0
    }
}

impl From<DynamicImage> for CapturedImage {
    fn from(image: DynamicImage) -> Self {
        Self(image)
    }
}

/// Model input. Only [`preprocess`] builds one, so the length is always
/// [`TENSOR_LEN`].
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Vec<f32>,
}

impl InputTensor {
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> [usize; 4] {
        TENSOR_SHAPE
    }

    /// Raw bytes in the platform's native float layout.
    #[cfg(test)]
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// The square crop, kept for the image region of the screen.
    pub thumbnail: DynamicImage,
    pub tensor: InputTensor,
}

pub fn preprocess(image: &CapturedImage) -> Result<Preprocessed, DetectionError> {
    let (width, height) = image.as_image().dimensions();
    if width == 0 || height == 0 {
        return Err(DetectionError::CaptureUnavailable(format!(
            "captured image is empty ({}x{})",
            width, height
        )));
    }

    let thumbnail = center_crop(image.as_image());
    let scaled = thumbnail.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);
    let tensor = image_to_tensor(&scaled.to_rgba8());

    Ok(Preprocessed { thumbnail, tensor })
}

/// Largest centered square. Odd leftovers go to the right/bottom edge.
pub fn center_crop(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let dimension = width.min(height);
    let x = (width - dimension) / 2;
    let y = (height - dimension) / 2;
    image.crop_imm(x, y, dimension, dimension)
}

/// Pixel packed as `0xAARRGGBB`.
pub fn pack_argb(pixel: &image::Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn unpack_rgb(packed: u32) -> [u8; 3] {
    [
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    ]
}

fn image_to_tensor(image: &RgbaImage) -> InputTensor {
    debug_assert_eq!(image.dimensions(), (INPUT_SIZE, INPUT_SIZE));

    let mut data = Vec::with_capacity(TENSOR_LEN);
    for pixel in image.pixels() {
        for channel in unpack_rgb(pack_argb(pixel)) {
            data.push(f32::from(channel) / 255.0);
        }
    }

    InputTensor { data }
}
