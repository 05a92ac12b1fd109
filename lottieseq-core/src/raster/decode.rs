use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::buffer::DecodedImage,
};

/// Decode encoded image bytes (PNG, JPEG or WebP) to straight RGBA8.
///
/// The format is sniffed from the bytes, not from `name`.
pub fn decode_image(name: impl Into<String>, bytes: &[u8]) -> LottieSeqResult<DecodedImage> {
    let name = name.into();
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LottieSeqError::decode(format!("'{name}': {e}")))?;
    Ok(DecodedImage::from_rgba(name, dyn_img.to_rgba8()))
}

/// Read and decode an image file, naming it `name`.
pub fn decode_file(name: impl Into<String>, path: &Path) -> LottieSeqResult<DecodedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(name, &bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/decode.rs"]
mod tests;
