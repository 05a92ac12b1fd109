use crate::{
    foundation::{
        core::FrameIndex,
        error::{LottieSeqError, LottieSeqResult},
        math::over_opaque_u8,
    },
    lottie::{data_uri::decode_data_uri, model::LottieDocument, view::AnimationView},
    raster::{buffer::DecodedImage, decode::decode_image},
};

/// Background used when flattening preview frames.
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Playback facts about an animation.
pub struct DocumentSummary {
    /// Frames per second, as stored.
    pub frame_rate: f64,
    /// First frame, as stored.
    pub in_point: f64,
    /// Number of frames, `op - ip` rounded to a whole frame.
    pub frame_count: u64,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Length of one playback cycle in seconds; 0 when the frame rate is unusable.
    pub duration_secs: f64,
}

impl DocumentSummary {
    fn from_timing(
        frame_rate: f64,
        in_point: f64,
        out_point: f64,
        width: u32,
        height: u32,
    ) -> Self {
        let span = (out_point - in_point).max(0.0);
        let duration_secs = if has_usable_rate(frame_rate) {
            span / frame_rate
        } else {
            tracing::warn!(
                frame_rate,
                "frame rate is not a positive number; duration reported as 0"
            );
            0.0
        };
        Self {
            frame_rate,
            in_point,
            frame_count: span.round() as u64,
            width,
            height,
            duration_secs,
        }
    }

    /// Index of the first frame (`ip` rounded, never negative).
    pub fn first_frame(&self) -> FrameIndex {
        FrameIndex(self.in_point.max(0.0).round() as u64)
    }

    /// Frame shown `secs` seconds into playback.
    ///
    /// With `looping` the timeline wraps around; otherwise it holds on the last frame.
    pub fn frame_at(&self, secs: f64, looping: bool) -> FrameIndex {
        let first = self.first_frame();
        let count = self.frame_count;
        if count == 0 || !secs.is_finite() || !has_usable_rate(self.frame_rate) {
            return first;
        }
        let raw = (secs * self.frame_rate).floor().max(0.0) as u64;
        let offset = if looping {
            raw % count
        } else {
            raw.min(count - 1)
        };
        FrameIndex(first.0 + offset)
    }
}

fn has_usable_rate(frame_rate: f64) -> bool {
    frame_rate.is_finite() && frame_rate > 0.0
}

impl LottieDocument {
    /// Summarize playback rate, length and canvas.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from_timing(
            f64::from(self.frame_rate),
            self.in_point as f64,
            self.out_point as f64,
            self.width,
            self.height,
        )
    }

    /// Frame shown `secs` seconds into playback; see [`DocumentSummary::frame_at`].
    pub fn frame_at(&self, secs: f64, looping: bool) -> FrameIndex {
        self.summary().frame_at(secs, looping)
    }

    /// Decode the embedded image of the layer visible at `frame`.
    pub fn decode_frame(&self, frame: FrameIndex) -> LottieSeqResult<DecodedImage> {
        let layer = self.layer_at(frame).ok_or_else(|| {
            LottieSeqError::input(format!(
                "no layer is visible at frame {} (document has {} frames)",
                frame.0,
                self.frame_count()
            ))
        })?;
        let asset = self.asset(&layer.ref_id).ok_or_else(|| {
            LottieSeqError::validation(format!(
                "layer '{}' references unknown asset '{}'",
                layer.name, layer.ref_id
            ))
        })?;
        decode_embedded(&layer.name, &asset.path)
    }
}

impl AnimationView {
    /// Summarize playback rate, length and canvas.
    ///
    /// An unusable frame rate (zero, negative or not finite) is logged and reported
    /// with a zero duration rather than failing.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from_timing(
            self.frame_rate,
            self.in_point,
            self.out_point,
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }

    /// Frame shown `secs` seconds into playback; see [`DocumentSummary::frame_at`].
    pub fn frame_at(&self, secs: f64, looping: bool) -> FrameIndex {
        self.summary().frame_at(secs, looping)
    }

    /// Decode the embedded image shown at `frame`.
    ///
    /// Only image layers are considered. Shape, text and precomposition layers are not
    /// rendered, so a frame without a visible image layer is an input error.
    pub fn decode_frame(&self, frame: FrameIndex) -> LottieSeqResult<DecodedImage> {
        let layer = self.image_layer_at(frame).ok_or_else(|| {
            LottieSeqError::input(format!("no image layer is visible at frame {}", frame.0))
        })?;
        let ref_id = layer.ref_id.as_deref().ok_or_else(|| {
            LottieSeqError::validation(format!("image layer '{}' has no refId", layer.name))
        })?;
        let path = self
            .asset(ref_id)
            .and_then(|a| a.path.as_deref())
            .ok_or_else(|| {
                LottieSeqError::validation(format!(
                    "layer '{}' references unknown asset '{ref_id}'",
                    layer.name
                ))
            })?;
        decode_embedded(&layer.name, path)
    }
}

fn decode_embedded(name: &str, data_uri: &str) -> LottieSeqResult<DecodedImage> {
    let (_mime, bytes) = decode_data_uri(data_uri)?;
    decode_image(name, &bytes)
}

/// Composite `image` over an opaque background colour; the result is fully opaque.
pub fn flatten_over(image: &DecodedImage, bg: [u8; 3]) -> DecodedImage {
    let mut px = image.pixels().to_vec();
    for p in px.chunks_exact_mut(4) {
        let a = p[3];
        p[0] = over_opaque_u8(p[0], bg[0], a);
        p[1] = over_opaque_u8(p[1], bg[1], a);
        p[2] = over_opaque_u8(p[2], bg[2], a);
        p[3] = 255;
    }
    image.with_pixels(px)
}

/// Parse `#rrggbb` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> LottieSeqResult<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LottieSeqError::parameter(format!(
            "colour '{s}' is not of the form #rrggbb"
        )));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| LottieSeqError::parameter(format!("colour '{s}': {e}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/preview.rs"]
mod tests;
