use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::{
        core::FrameIndex,
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::model::IMAGE_LAYER_TYPE,
};

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// Read-only view of any Lottie file, not just the image sequences this crate writes.
///
/// Frame rate and in/out points may be fractional, layers may be of any type, and keys
/// outside this subset are ignored. Use [`crate::LottieDocument`] to build or strictly
/// validate an image-sequence document.
pub struct AnimationView {
    /// Frames per second (`fr`).
    #[serde(rename = "fr")]
    pub frame_rate: f64,
    /// First frame (`ip`).
    #[serde(rename = "ip", default)]
    pub in_point: f64,
    /// Frame after the last one (`op`).
    #[serde(rename = "op")]
    pub out_point: f64,
    /// Canvas width (`w`).
    #[serde(rename = "w", default)]
    pub width: f64,
    /// Canvas height (`h`).
    #[serde(rename = "h", default)]
    pub height: f64,
    /// Display name (`nm`).
    #[serde(rename = "nm", default)]
    pub name: String,
    /// Assets of every kind; only `id` and `p` are read.
    #[serde(default)]
    pub assets: Vec<ViewAsset>,
    /// Top-level layers of every type.
    #[serde(default)]
    pub layers: Vec<ViewLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// Asset as seen by [`AnimationView`].
pub struct ViewAsset {
    /// Identifier layers refer to.
    #[serde(default)]
    pub id: String,
    /// File name or data URI (`p`); absent for precomposition assets.
    #[serde(rename = "p", default)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// Layer as seen by [`AnimationView`].
pub struct ViewLayer {
    /// Layer type code (`ty`).
    #[serde(rename = "ty", default)]
    pub layer_type: Option<i64>,
    /// Layer name (`nm`).
    #[serde(rename = "nm", default)]
    pub name: String,
    /// Referenced asset (`refId`), for image and precomposition layers.
    #[serde(rename = "refId", default)]
    pub ref_id: Option<String>,
    /// First visible frame (`ip`).
    #[serde(rename = "ip", default)]
    pub in_point: f64,
    /// First frame after visibility ends (`op`).
    #[serde(rename = "op", default)]
    pub out_point: f64,
}

impl ViewLayer {
    /// Whether this is a static image layer.
    pub fn is_image(&self) -> bool {
        self.layer_type == Some(i64::from(IMAGE_LAYER_TYPE))
    }

    /// Whether `frame` falls in `[in_point, out_point)`.
    pub fn is_visible_at(&self, frame: FrameIndex) -> bool {
        let f = frame.0 as f64;
        self.in_point <= f && f < self.out_point
    }
}

impl AnimationView {
    /// First image layer visible at `frame`; other layer types are skipped.
    pub fn image_layer_at(&self, frame: FrameIndex) -> Option<&ViewLayer> {
        self.layers.iter().find(|l| l.is_image() && l.is_visible_at(frame))
    }

    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&ViewAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Parse a view from JSON text.
    pub fn from_json_str(json: &str) -> LottieSeqResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            LottieSeqError::serde(format!("invalid Lottie animation JSON: {e}"))
        })
    }

    /// Read and parse a view from a JSON file.
    pub fn from_path(path: &Path) -> LottieSeqResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read Lottie document '{}'", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/view.rs"]
mod tests;
