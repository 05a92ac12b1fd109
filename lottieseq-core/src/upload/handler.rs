use std::path::PathBuf;

use crate::{
    archive::container::read_archive,
    foundation::{
        core::Fps,
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::{
        assemble::{AssembleOptions, assemble_with},
        model::LottieDocument,
    },
    raster::decode::decode_file,
    sequence::orderer::{ExtensionFilter, order_entries},
    upload::staging::StagingArea,
};

/// Default file name for a Lottie document produced from an upload.
pub const ANIMATION_FILE_NAME: &str = "animation.json";

#[derive(Clone, Debug, PartialEq, Eq)]
/// An uploaded zip archive plus the raw frame-rate form field.
pub struct UploadRequest {
    /// Zip archive bytes.
    pub archive: Vec<u8>,
    /// Frame rate as typed by the user; parsed and clamped on handling.
    pub fps: String,
}

impl UploadRequest {
    /// Build a request.
    pub fn new(archive: Vec<u8>, fps: impl Into<String>) -> Self {
        Self {
            archive,
            fps: fps.into(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Settings for [`handle_upload`].
pub struct UploadOptions {
    /// Parent directory for the per-request staging directory; the system temp dir
    /// when `None`.
    pub staging_root: Option<PathBuf>,
    /// How frames are embedded in the resulting document.
    pub assemble: AssembleOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Failure half of an [`UploadResponse`].
pub struct UploadFailure {
    /// HTTP-style status: 400 for caller mistakes, 500 otherwise.
    pub status: u16,
    /// User-facing message.
    pub message: String,
}

impl serde::Serialize for UploadFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// Result of [`handle_upload`]; serializes to `{"lottie": ...}` or `{"error": "..."}`.
pub enum UploadResponse {
    /// The assembled document.
    Lottie(Box<LottieDocument>),
    /// What went wrong.
    Error(UploadFailure),
}

impl UploadResponse {
    fn from_error(err: &LottieSeqError) -> Self {
        let status = if err.is_client_error() { 400 } else { 500 };
        Self::Error(UploadFailure {
            status,
            message: err.to_string(),
        })
    }

    /// HTTP-style status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Lottie(_) => 200,
            Self::Error(f) => f.status,
        }
    }

    /// The document, when the upload succeeded.
    pub fn lottie(&self) -> Option<&LottieDocument> {
        match self {
            Self::Lottie(doc) => Some(&**doc),
            Self::Error(_) => None,
        }
    }

    /// Serialize the response body.
    pub fn to_json_string(&self) -> LottieSeqResult<String> {
        serde_json::to_string(self)
            .map_err(|e| LottieSeqError::serde(format!("serialize upload response: {e}")))
    }
}

/// Turn an uploaded archive into a Lottie document.
///
/// The frame rate is parsed (non-integers are rejected) and clamped to 1..=60. Qualifying
/// entries are staged on disk in natural order, decoded, then assembled. The staging
/// directory is removed before this returns, whatever the outcome.
#[tracing::instrument(skip_all, fields(bytes = req.archive.len(), fps = %req.fps))]
pub fn handle_upload(req: &UploadRequest, opts: &UploadOptions) -> UploadResponse {
    match convert_upload(req, opts) {
        Ok(doc) => {
            tracing::info!(frames = doc.frame_count(), "upload converted");
            UploadResponse::Lottie(Box::new(doc))
        }
        Err(e) => {
            tracing::warn!(error = %e, "upload rejected");
            UploadResponse::from_error(&e)
        }
    }
}

fn convert_upload(req: &UploadRequest, opts: &UploadOptions) -> LottieSeqResult<LottieDocument> {
    let fps = Fps::parse_clamped(&req.fps)?;
    let entries = order_entries(read_archive(&req.archive)?, &ExtensionFilter::LOTTIE)?;

    let staging = StagingArea::new(opts.staging_root.as_deref())?;
    let mut images = Vec::with_capacity(entries.len());
    for entry in &entries {
        let path = staging.stage(entry)?;
        images.push(decode_file(entry.name.as_str(), &path)?);
    }
    tracing::debug!(
        staged = images.len(),
        dir = %staging.path().display(),
        "decoded staged frames"
    );

    assemble_with(&images, fps, &opts.assemble)
}

#[cfg(test)]
#[path = "../../tests/unit/upload/handler.rs"]
mod tests;
