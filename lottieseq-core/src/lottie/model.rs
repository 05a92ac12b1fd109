use std::{collections::HashMap, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::{Canvas, Fps, FrameIndex, FrameRange},
    error::{LottieSeqError, LottieSeqResult},
};

/// Lottie schema version written into generated documents.
pub const LOTTIE_VERSION: &str = "5.5.9";
/// Document name used when the caller does not pick one.
pub const DEFAULT_DOCUMENT_NAME: &str = "Image Sequence Animation";
/// Lottie layer type code for static image layers.
pub const IMAGE_LAYER_TYPE: u8 = 2;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A Lottie animation made of embedded raster frames.
///
/// Field names follow the Lottie short-key schema on the wire. Each frame is one
/// [`ImageAsset`] shown by exactly one [`ImageLayer`] for a single frame slot.
pub struct LottieDocument {
    /// Schema version (`v`).
    #[serde(rename = "v")]
    pub version: String,
    /// Frames per second (`fr`).
    #[serde(rename = "fr")]
    pub frame_rate: u32,
    /// First frame (`ip`), always 0 for generated documents.
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// Frame after the last one (`op`); equals the frame count.
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Canvas width (`w`), taken from the first frame.
    #[serde(rename = "w")]
    pub width: u32,
    /// Canvas height (`h`), taken from the first frame.
    #[serde(rename = "h")]
    pub height: u32,
    /// Display name (`nm`).
    #[serde(rename = "nm")]
    pub name: String,
    /// 3D flag; always 0.
    pub ddd: u8,
    /// Embedded frame images, one per frame.
    pub assets: Vec<ImageAsset>,
    /// Image layers, one per frame, in playback order.
    pub layers: Vec<ImageLayer>,
    /// Timeline markers; generated documents carry none.
    #[serde(default)]
    pub markers: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Image asset with its pixels embedded as a data URI.
pub struct ImageAsset {
    /// Identifier referenced by [`ImageLayer::ref_id`].
    pub id: String,
    /// Image width in pixels.
    #[serde(rename = "w")]
    pub width: u32,
    /// Image height in pixels.
    #[serde(rename = "h")]
    pub height: u32,
    /// Directory prefix; empty for embedded assets.
    #[serde(rename = "u", default)]
    pub dir: String,
    /// `data:<mime>;base64,<payload>` URI.
    #[serde(rename = "p")]
    pub path: String,
    /// Embedded flag; 1 means `path` is a data URI.
    #[serde(rename = "e", default)]
    pub embedded: u8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A static image layer visible during `[in_point, out_point)`.
pub struct ImageLayer {
    /// 3D flag; always 0.
    pub ddd: u8,
    /// 1-based layer index (`ind`).
    #[serde(rename = "ind")]
    pub index: u64,
    /// Layer type (`ty`); [`IMAGE_LAYER_TYPE`].
    #[serde(rename = "ty")]
    pub layer_type: u8,
    /// Source file name (`nm`).
    #[serde(rename = "nm")]
    pub name: String,
    /// Asset shown by this layer.
    #[serde(rename = "refId")]
    pub ref_id: String,
    /// Time stretch; always 1.
    #[serde(rename = "sr")]
    pub stretch: u32,
    /// Static transform (`ks`).
    #[serde(rename = "ks")]
    pub transform: LayerTransform,
    /// Auto-orient flag; always 0.
    pub ao: u8,
    /// First visible frame (`ip`).
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// First frame after visibility ends (`op`).
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Layer start time (`st`).
    #[serde(rename = "st")]
    pub start_time: u64,
    /// Blend mode; 0 is normal.
    #[serde(rename = "bm")]
    pub blend_mode: u8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Non-animated layer transform.
pub struct LayerTransform {
    /// Opacity in percent.
    #[serde(rename = "o")]
    pub opacity: StaticValue<f64>,
    /// Rotation in degrees.
    #[serde(rename = "r")]
    pub rotation: StaticValue<f64>,
    /// Position `[x, y, z]`.
    #[serde(rename = "p")]
    pub position: StaticValue<[f64; 3]>,
    /// Anchor point `[x, y, z]`.
    #[serde(rename = "a")]
    pub anchor: StaticValue<[f64; 3]>,
    /// Scale in percent `[x, y, z]`.
    #[serde(rename = "s")]
    pub scale: StaticValue<[f64; 3]>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A Lottie property with animation disabled (`{"a": 0, "k": value}`).
pub struct StaticValue<T> {
    /// Animated flag; 0 for static values.
    #[serde(rename = "a")]
    pub animated: u8,
    /// The value.
    #[serde(rename = "k")]
    pub value: T,
}

impl<T> StaticValue<T> {
    /// Wrap a constant value.
    pub fn new(value: T) -> Self {
        Self { animated: 0, value }
    }
}

impl LayerTransform {
    /// Identity transform anchored and positioned at the centre of a `width x height` image.
    pub fn centered(width: u32, height: u32) -> Self {
        let center = [f64::from(width) / 2.0, f64::from(height) / 2.0, 0.0];
        Self {
            opacity: StaticValue::new(100.0),
            rotation: StaticValue::new(0.0),
            position: StaticValue::new(center),
            anchor: StaticValue::new(center),
            scale: StaticValue::new([100.0, 100.0, 100.0]),
        }
    }
}

impl ImageAsset {
    /// Asset whose pixels are embedded as `data_uri`.
    pub fn embedded(id: String, width: u32, height: u32, data_uri: String) -> Self {
        Self {
            id,
            width,
            height,
            dir: String::new(),
            path: data_uri,
            embedded: 1,
        }
    }
}

impl ImageLayer {
    /// Layer for frame slot `slot`, showing asset `ref_id` of size `width x height`.
    pub fn single_frame(slot: u64, name: String, ref_id: String, width: u32, height: u32) -> Self {
        Self {
            ddd: 0,
            index: slot + 1,
            layer_type: IMAGE_LAYER_TYPE,
            name,
            ref_id,
            stretch: 1,
            transform: LayerTransform::centered(width, height),
            ao: 0,
            in_point: slot,
            out_point: slot + 1,
            start_time: slot,
            blend_mode: 0,
        }
    }

    /// Visibility window `[in_point, out_point)`.
    pub fn window(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.in_point),
            end: FrameIndex(self.out_point),
        }
    }
}

impl LottieDocument {
    /// Number of frames in the animation.
    pub fn frame_count(&self) -> u64 {
        self.out_point.saturating_sub(self.in_point)
    }

    /// Playback rate.
    pub fn fps(&self) -> LottieSeqResult<Fps> {
        Fps::new(self.frame_rate)
    }

    /// Canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Visibility window of layer `i`, if it exists.
    pub fn layer_window(&self, i: usize) -> Option<FrameRange> {
        self.layers.get(i).map(ImageLayer::window)
    }

    /// The image layer visible at `frame`.
    pub fn layer_at(&self, frame: FrameIndex) -> Option<&ImageLayer> {
        self.layers
            .iter()
            .find(|l| l.layer_type == IMAGE_LAYER_TYPE && l.window().contains(frame))
    }

    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&ImageAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Check the structural invariants of an image-sequence document.
    pub fn validate(&self) -> LottieSeqResult<()> {
        if self.frame_rate == 0 {
            return Err(LottieSeqError::validation("fr must be > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LottieSeqError::validation("canvas w/h must be > 0"));
        }
        if self.in_point > self.out_point {
            return Err(LottieSeqError::validation("ip must be <= op"));
        }

        let frames = self.frame_count();
        if self.layers.len() as u64 != frames || self.assets.len() as u64 != frames {
            return Err(LottieSeqError::validation(format!(
                "expected {frames} layers and assets, found {} layers and {} assets",
                self.layers.len(),
                self.assets.len()
            )));
        }

        let mut refs: HashMap<&str, usize> = HashMap::with_capacity(self.assets.len());
        for asset in &self.assets {
            if refs.insert(asset.id.as_str(), 0).is_some() {
                return Err(LottieSeqError::validation(format!(
                    "duplicate asset id '{}'",
                    asset.id
                )));
            }
            if asset.embedded != 1 || !asset.path.starts_with("data:") {
                return Err(LottieSeqError::validation(format!(
                    "asset '{}' is not an embedded data URI",
                    asset.id
                )));
            }
        }

        for (i, layer) in self.layers.iter().enumerate() {
            let slot = self.in_point + i as u64;
            if layer.in_point != slot || layer.out_point != slot + 1 {
                return Err(LottieSeqError::validation(format!(
                    "layer #{i} window is [{}, {}), expected [{slot}, {})",
                    layer.in_point,
                    layer.out_point,
                    slot + 1
                )));
            }
            if layer.index != i as u64 + 1 {
                return Err(LottieSeqError::validation(format!(
                    "layer #{i} has ind {}, expected {}",
                    layer.index,
                    i + 1
                )));
            }
            let Some(count) = refs.get_mut(layer.ref_id.as_str()) else {
                return Err(LottieSeqError::validation(format!(
                    "layer #{i} references unknown asset '{}'",
                    layer.ref_id
                )));
            };
            *count += 1;
        }

        if let Some((id, n)) = refs.iter().find(|(_, n)| **n != 1) {
            return Err(LottieSeqError::validation(format!(
                "asset '{id}' is referenced by {n} layers, expected exactly 1"
            )));
        }
        Ok(())
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> LottieSeqResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            LottieSeqError::serde(format!("invalid Lottie animation JSON: {e}"))
        })
    }

    /// Read and parse a document from a JSON file.
    pub fn from_path(path: &Path) -> LottieSeqResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read Lottie document '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Serialize to JSON, compact or pretty-printed.
    pub fn to_json_string(&self, pretty: bool) -> LottieSeqResult<String> {
        let res = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        res.map_err(|e| LottieSeqError::serde(format!("serialize Lottie document: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/model.rs"]
mod tests;
