use std::sync::Arc;

use crate::foundation::error::{LottieSeqError, LottieSeqResult};

/// One decoded source raster: straight-alpha RGBA8, row-major, top-left origin.
///
/// The buffer is immutable once built; transforms produce a new value. Cloning is cheap
/// because the pixel storage is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    name: String,
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap an RGBA8 buffer, checking that its length matches `width * height * 4`.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> LottieSeqResult<Self> {
        let name = name.into();
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                LottieSeqError::validation(format!("'{name}': {width}x{height} overflows"))
            })?;
        if pixels.len() != expected {
            return Err(LottieSeqError::validation(format!(
                "'{name}': pixel buffer has {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            name,
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    /// Take ownership of an `image` crate RGBA buffer.
    pub fn from_rgba(name: impl Into<String>, rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            name: name.into(),
            width,
            height,
            pixels: Arc::new(rgba.into_raw()),
        }
    }

    /// Same-size sibling with different pixel bytes. Caller guarantees the length.
    pub(crate) fn with_pixels(&self, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        Self {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            pixels: Arc::new(pixels),
        }
    }

    /// Same pixels under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: self.width,
            height: self.height,
            pixels: Arc::clone(&self.pixels),
        }
    }

    /// Archive-relative identity of the image.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_slice()
    }

    /// Whether the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Copy into an `image` crate buffer for codec and resampling calls.
    pub fn to_rgba_image(&self) -> LottieSeqResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.to_vec()).ok_or_else(
            || LottieSeqError::validation(format!("'{}': pixel buffer size mismatch", self.name)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
