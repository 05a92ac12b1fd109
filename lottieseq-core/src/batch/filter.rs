use crate::{
    archive::container::{ArchiveEntry, read_archive},
    batch::runner::{BatchRunner, CancelToken, FilterOutcome, collect_archive},
    color::{params::AdjustmentParameters, pipeline::apply},
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::{buffer::DecodedImage, decode::decode_image, encode::encode_image, kind::ImageKind},
    sequence::orderer::{ExtensionFilter, order_entries},
};

/// Default file name for the archive produced by [`process_archive`].
pub const PROCESSED_ARCHIVE_NAME: &str = "processed_images.zip";

/// Adjust the first qualifying image, in natural order, for a single-image preview.
pub fn preview_first(
    entries: &[ArchiveEntry],
    params: &AdjustmentParameters,
) -> LottieSeqResult<DecodedImage> {
    let ordered = order_entries(entries.to_vec(), &ExtensionFilter::ADJUST)?;
    let first = &ordered[0];
    let image = decode_image(first.name.as_str(), first.contents()?)?;
    Ok(apply(&image, params))
}

/// Adjust every qualifying image of a zip archive into a new archive.
///
/// Each output keeps its entry name and is re-encoded in the format its extension
/// names. An entry that cannot be read, decoded or encoded is reported and left out;
/// the rest of the batch carries on.
#[tracing::instrument(skip_all, fields(bytes = archive.len()))]
pub fn process_archive(
    archive: &[u8],
    params: &AdjustmentParameters,
    runner: &BatchRunner,
    cancel: &CancelToken,
) -> LottieSeqResult<FilterOutcome> {
    let entries = order_entries(read_archive(archive)?, &ExtensionFilter::ADJUST)?;
    let params = params.clamped();
    let items = entries.into_iter().map(|e| (e.name.clone(), e)).collect();

    let report = runner.run(items, cancel, |name, entry: ArchiveEntry| {
        let kind = ImageKind::from_name(name)
            .ok_or_else(|| LottieSeqError::input(format!("'{name}' has no image extension")))?;
        let adjusted = apply(&decode_image(name, entry.contents()?)?, &params);
        tracing::debug!(name, "adjusted entry");
        Ok(ArchiveEntry::file(name, encode_image(&adjusted, kind)?))
    });
    collect_archive(report)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/filter.rs"]
mod tests;
