use rayon::prelude::*;

use crate::{
    foundation::{
        core::Fps,
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::{
        data_uri::encode_data_uri,
        model::{DEFAULT_DOCUMENT_NAME, ImageAsset, ImageLayer, LOTTIE_VERSION, LottieDocument},
    },
    raster::{buffer::DecodedImage, encode::encode_image, kind::ImageKind},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Codec used for the frame payloads embedded in the document.
pub enum EmbedFormat {
    /// PNG payloads; supported by every Lottie player.
    #[default]
    Png,
    /// Lossless WebP payloads; smaller, but not every player decodes them.
    WebpLossless,
}

impl EmbedFormat {
    /// Raster format written for this embed mode.
    pub fn kind(self) -> ImageKind {
        match self {
            Self::Png => ImageKind::Png,
            Self::WebpLossless => ImageKind::Webp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options for [`assemble_with`].
pub struct AssembleOptions {
    /// Document name (`nm`).
    pub name: String,
    /// Payload codec for embedded frames.
    pub embed: EmbedFormat,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOCUMENT_NAME.to_string(),
            embed: EmbedFormat::default(),
        }
    }
}

/// Build a Lottie document showing `images` in order, one frame each, with PNG payloads.
///
/// See [`assemble_with`].
pub fn assemble(images: &[DecodedImage], fps: Fps) -> LottieSeqResult<LottieDocument> {
    assemble_with(images, fps, &AssembleOptions::default())
}

/// Build a Lottie document showing `images` in order, one frame each.
///
/// Image `i` becomes asset `image_<i>` and a layer visible during `[i, i+1)`, anchored and
/// positioned at its own centre. The canvas takes the first image's size; later frames
/// keep their native size and are neither scaled nor letterboxed.
///
/// The output is a pure function of the inputs: identical inputs serialize to identical
/// JSON.
#[tracing::instrument(skip_all, fields(frames = images.len(), fps = fps.get()))]
pub fn assemble_with(
    images: &[DecodedImage],
    fps: Fps,
    opts: &AssembleOptions,
) -> LottieSeqResult<LottieDocument> {
    let first = images.first().ok_or_else(|| {
        LottieSeqError::input("cannot assemble a Lottie document from zero images")
    })?;
    let (width, height) = first.dimensions();
    if width == 0 || height == 0 {
        return Err(LottieSeqError::input(format!(
            "first frame '{}' has no pixels ({width}x{height})",
            first.name()
        )));
    }

    let kind = opts.embed.kind();
    let payloads = images
        .par_iter()
        .map(|img| encode_image(img, kind).map(|bytes| encode_data_uri(kind, &bytes)))
        .collect::<LottieSeqResult<Vec<String>>>()?;

    let mut assets = Vec::with_capacity(images.len());
    let mut layers = Vec::with_capacity(images.len());
    for (slot, (image, uri)) in images.iter().zip(payloads).enumerate() {
        let id = format!("image_{slot}");
        assets.push(ImageAsset::embedded(
            id.clone(),
            image.width(),
            image.height(),
            uri,
        ));
        layers.push(ImageLayer::single_frame(
            slot as u64,
            image.name().to_string(),
            id,
            image.width(),
            image.height(),
        ));
    }

    let doc = LottieDocument {
        version: LOTTIE_VERSION.to_string(),
        frame_rate: fps.get(),
        in_point: 0,
        out_point: images.len() as u64,
        width,
        height,
        name: opts.name.clone(),
        ddd: 0,
        assets,
        layers,
        markers: Vec::new(),
    };
    tracing::debug!(width, height, "assembled Lottie document");
    Ok(doc)
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/assemble.rs"]
mod tests;
