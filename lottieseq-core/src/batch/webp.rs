use crate::{
    archive::container::{ArchiveEntry, read_archive},
    batch::runner::{BatchRunner, CancelToken, FilterOutcome, collect_archive},
    foundation::error::LottieSeqResult,
    raster::{
        decode::decode_image,
        encode::{downsample, encode_image},
        kind::{ImageKind, with_extension},
    },
    sequence::orderer::{ExtensionFilter, order_entries},
};

/// Default file name for the archive produced by [`convert_archive`].
pub const CONVERTED_ARCHIVE_NAME: &str = "converted_images.zip";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options for PNG to WebP conversion.
pub struct WebpOptions {
    /// Output size as a percentage of the source, clamped to `1..=100`.
    pub scale_percent: u32,
}

impl Default for WebpOptions {
    fn default() -> Self {
        Self { scale_percent: 100 }
    }
}

impl WebpOptions {
    /// Scale percentage forced into `1..=100`.
    pub fn clamped_percent(&self) -> u32 {
        self.scale_percent.clamp(1, 100)
    }
}

/// Convert every PNG in a zip archive to lossless WebP, optionally downsampled.
///
/// Output entries are named after their source with the extension replaced by `.webp`.
/// Entries that cannot be read or converted are reported and left out.
#[tracing::instrument(skip_all, fields(bytes = archive.len(), scale = opts.clamped_percent()))]
pub fn convert_archive(
    archive: &[u8],
    opts: &WebpOptions,
    runner: &BatchRunner,
    cancel: &CancelToken,
) -> LottieSeqResult<FilterOutcome> {
    let entries = order_entries(read_archive(archive)?, &ExtensionFilter::WEBP_SOURCE)?;
    let percent = opts.clamped_percent();
    let items = entries.into_iter().map(|e| (e.name.clone(), e)).collect();

    let report = runner.run(items, cancel, |name, entry: ArchiveEntry| {
        let target = with_extension(name, ImageKind::Webp.extension());
        let scaled = downsample(&decode_image(target.as_str(), entry.contents()?)?, percent)?;
        tracing::debug!(
            name,
            width = scaled.width(),
            height = scaled.height(),
            "converted entry"
        );
        let encoded = encode_image(&scaled, ImageKind::Webp)?;
        Ok(ArchiveEntry::file(target, encoded))
    });
    collect_archive(report)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/webp.rs"]
mod tests;
