//! lottieseq turns numbered image sequences into Lottie animations and batch-adjusts
//! the colours of zipped image sets.
//!
//! # Pipeline overview
//!
//! 1. **Order**: archive entries are filtered by extension and sorted in natural order
//!    (`frame2` before `frame10`).
//! 2. **Decode**: each entry becomes a straight-alpha RGBA8 [`DecodedImage`].
//! 3. **Assemble**: [`assemble`] embeds every frame as a base64 data URI in its own asset
//!    and shows it on its own single-frame image layer.
//! 4. **Adjust** (optional): [`apply`] runs the seven photographic dials over a frame;
//!    [`BatchRunner`] runs that (or any per-image job) over whole sets in parallel.
//!
//! The [`handle_upload`] boundary wires steps 1 to 3 behind a request/response pair, and
//! [`convert_archive`] / [`process_archive`] wrap the batch paths as zip-to-zip jobs.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: ordering, assembly and the colour pipeline are pure; identical
//!   inputs produce identical bytes.
//! - **Contained failures**: one broken image in a batch is reported, never fatal.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod archive;
mod batch;
mod color;
mod foundation;
mod lottie;
mod raster;
mod sequence;
mod upload;

pub use archive::container::{ArchiveEntry, read_archive, write_archive};
pub use batch::filter::{PROCESSED_ARCHIVE_NAME, preview_first, process_archive};
pub use batch::runner::{
    BatchFailure, BatchOptions, BatchReport, BatchRunner, BatchSummary, CancelToken,
    FilterOutcome,
};
pub use batch::webp::{CONVERTED_ARCHIVE_NAME, WebpOptions, convert_archive};
pub use color::params::AdjustmentParameters;
pub use color::pipeline::{adjust_rgb, apply};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use foundation::error::{LottieSeqError, LottieSeqResult};
pub use lottie::assemble::{AssembleOptions, EmbedFormat, assemble, assemble_with};
pub use lottie::data_uri::{decode_data_uri, encode_data_uri};
pub use lottie::model::{
    DEFAULT_DOCUMENT_NAME, IMAGE_LAYER_TYPE, ImageAsset, ImageLayer, LOTTIE_VERSION,
    LayerTransform, LottieDocument, StaticValue,
};
pub use lottie::preview::{DEFAULT_BACKGROUND, DocumentSummary, flatten_over, parse_hex_color};
pub use lottie::view::{AnimationView, ViewAsset, ViewLayer};
pub use raster::buffer::DecodedImage;
pub use raster::decode::{decode_file, decode_image};
pub use raster::encode::{JPEG_QUALITY, downsample, encode_image};
pub use raster::kind::{ImageKind, with_extension};
pub use sequence::natural::natural_cmp;
pub use sequence::orderer::{ExtensionFilter, order_entries, select_names};
pub use upload::handler::{
    ANIMATION_FILE_NAME, UploadFailure, UploadOptions, UploadRequest, UploadResponse,
    handle_upload,
};
pub use upload::staging::staged_rel_path;
