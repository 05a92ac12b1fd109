use image::{ExtendedColorType, ImageEncoder, imageops::FilterType};

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::{buffer::DecodedImage, kind::ImageKind},
};

/// Quality used when a JPEG has to be produced.
pub const JPEG_QUALITY: u8 = 90;

/// Encode an image in `kind`.
///
/// PNG and WebP keep the alpha channel (WebP is lossless). JPEG has no alpha, so the
/// channel is dropped.
pub fn encode_image(image: &DecodedImage, kind: ImageKind) -> LottieSeqResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut out = Vec::new();
    let res = match kind {
        ImageKind::Png => image::codecs::png::PngEncoder::new(&mut out).write_image(
            image.pixels(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ImageKind::Jpeg => {
            let rgb = drop_alpha(image.pixels());
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        }
        ImageKind::Webp => image::codecs::webp::WebPEncoder::new_lossless(&mut out).write_image(
            image.pixels(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };
    res.map_err(|e| LottieSeqError::decode(format!("encode '{}' as {kind}: {e}", image.name())))?;
    Ok(out)
}

/// Scale both dimensions by `percent` (clamped to 1..=100), never below one pixel.
pub fn downsample(image: &DecodedImage, percent: u32) -> LottieSeqResult<DecodedImage> {
    let percent = percent.clamp(1, 100);
    if percent == 100 || image.is_empty() {
        return Ok(image.clone());
    }
    let (width, height) = image.dimensions();
    let scaled = |dim: u32| ((u64::from(dim) * u64::from(percent)) / 100).max(1) as u32;
    let (new_w, new_h) = (scaled(width), scaled(height));

    let src = image.to_rgba_image()?;
    let resized = image::imageops::resize(&src, new_w, new_h, FilterType::Triangle);
    Ok(DecodedImage::from_rgba(image.name(), resized))
}

fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/raster/encode.rs"]
mod tests;
