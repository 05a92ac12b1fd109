use crate::{
    color::params::AdjustmentParameters, foundation::math::quantize_channel,
    raster::buffer::DecodedImage,
};

const MID_GRAY: f64 = 128.0;

/// Apply the adjustment dials to every pixel, returning a new image.
///
/// The input is untouched and alpha passes through. Parameters are clamped into range
/// first. Preview and batch processing both go through this function, so they produce
/// identical pixels for identical inputs.
pub fn apply(image: &DecodedImage, params: &AdjustmentParameters) -> DecodedImage {
    let params = params.clamped();
    let mut px = image.pixels().to_vec();
    for p in px.chunks_exact_mut(4) {
        let [r, g, b] = adjust_rgb(p[0], p[1], p[2], &params);
        p[0] = r;
        p[1] = g;
        p[2] = b;
    }
    image.with_pixels(px)
}

/// Adjust one RGB triple.
///
/// Step order is fixed: exposure, contrast, saturation, temperature/tint, then
/// highlights/shadows keyed on the luma of the colour at that point. Parameters are
/// used as given.
pub fn adjust_rgb(r: u8, g: u8, b: u8, params: &AdjustmentParameters) -> [u8; 3] {
    let mut c = [f64::from(r), f64::from(g), f64::from(b)];

    let lift = 255.0 * params.exposure;
    for v in &mut c {
        *v += lift;
    }

    for v in &mut c {
        *v = (*v - MID_GRAY) * params.contrast + MID_GRAY;
    }

    let avg = (c[0] + c[1] + c[2]) / 3.0;
    for v in &mut c {
        *v = avg + (*v - avg) * params.saturation;
    }

    c[0] += params.temperature + params.tint;
    c[1] += params.tint;
    c[2] -= params.temperature;

    let luma = 0.299 * c[0] + 0.587 * c[1] + 0.114 * c[2];
    let push = if luma > MID_GRAY {
        params.highlights
    } else {
        params.shadows
    };
    for v in &mut c {
        *v += (*v - MID_GRAY) * push;
    }

    c.map(quantize_channel)
}

#[cfg(test)]
#[path = "../../tests/unit/color/pipeline.rs"]
mod tests;
