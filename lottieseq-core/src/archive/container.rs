use std::io::{Cursor, Read, Write};

use anyhow::Context;

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::kind::ImageKind,
};

/// One archive member: exact name, raw bytes and whether it is a folder.
///
/// A member whose data could not be read (bad CRC, broken deflate stream) is kept in
/// the list with `read_error` set, so one damaged file does not hide its siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name exactly as stored, path separators included.
    pub name: String,
    /// Raw (uncompressed) bytes; empty for directories and unreadable files.
    pub bytes: Vec<u8>,
    /// Whether the entry is a folder rather than a file.
    pub is_dir: bool,
    /// Why the entry's data could not be read, if it could not.
    pub read_error: Option<String>,
}

impl ArchiveEntry {
    /// A regular file entry.
    pub fn file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            is_dir: false,
            read_error: None,
        }
    }

    /// A file entry whose data could not be read.
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: Vec::new(),
            is_dir: false,
            read_error: Some(reason.into()),
        }
    }

    /// A directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: Vec::new(),
            is_dir: true,
            read_error: None,
        }
    }

    /// The entry's bytes, or an input error naming the entry if they could not be read.
    pub fn contents(&self) -> LottieSeqResult<&[u8]> {
        match &self.read_error {
            Some(reason) => Err(LottieSeqError::input(format!(
                "archive entry '{}' is unreadable: {reason}",
                self.name
            ))),
            None => Ok(&self.bytes),
        }
    }

    /// Raster format implied by the entry's extension, if any.
    pub fn kind(&self) -> Option<ImageKind> {
        if self.is_dir {
            return None;
        }
        ImageKind::from_name(&self.name)
    }
}

/// Read every member of a zip archive, in central-directory order.
///
/// A broken central directory fails the whole read. Damage confined to one member's
/// data is recorded on that entry instead; see [`ArchiveEntry::contents`].
pub fn read_archive(bytes: &[u8]) -> LottieSeqResult<Vec<ArchiveEntry>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LottieSeqError::input(format!("malformed archive: {e}")))?;

    let mut out = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let mut file = zip
            .by_index(i)
            .map_err(|e| LottieSeqError::input(format!("malformed archive entry #{i}: {e}")))?;
        let name = file.name().to_string();
        if file.is_dir() {
            out.push(ArchiveEntry::dir(name));
            continue;
        }
        let mut buf = Vec::with_capacity(file.size().min(64 << 20) as usize);
        match file.read_to_end(&mut buf) {
            Ok(_) => out.push(ArchiveEntry::file(name, buf)),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "unreadable archive entry");
                out.push(ArchiveEntry::unreadable(name, e.to_string()));
            }
        }
    }
    tracing::debug!(entries = out.len(), "read archive");
    Ok(out)
}

/// Write entries into a new deflate-compressed zip archive, in the given order.
///
/// Unreadable entries have no data to write and fail the call.
pub fn write_archive(entries: &[ArchiveEntry]) -> LottieSeqResult<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        if entry.is_dir {
            zip.add_directory(entry.name.as_str(), opts)
                .with_context(|| format!("add archive directory '{}'", entry.name))?;
            continue;
        }
        zip.start_file(entry.name.as_str(), opts)
            .with_context(|| format!("start archive entry '{}'", entry.name))?;
        zip.write_all(entry.contents()?)
            .with_context(|| format!("write archive entry '{}'", entry.name))?;
    }

    let cursor = zip.finish().context("finish archive")?;
    Ok(cursor.into_inner())
}

/// Stored (uncompressed) archive of `entries` with two bytes of `victim`'s payload
/// flipped, so that member fails its CRC check when read back.
#[cfg(test)]
pub(crate) fn archive_with_corrupt_entry(entries: &[ArchiveEntry], victim: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for entry in entries {
        zip.start_file(entry.name.as_str(), opts).unwrap();
        zip.write_all(&entry.bytes).unwrap();
    }
    let mut bytes = zip.finish().unwrap().into_inner();

    let payload = &entries.iter().find(|e| e.name == victim).unwrap().bytes;
    let at = bytes
        .windows(payload.len())
        .position(|w| w == payload.as_slice())
        .unwrap()
        + payload.len() / 2;
    bytes[at] ^= 0xff;
    bytes[at + 1] ^= 0xff;
    bytes
}

#[cfg(test)]
#[path = "../../tests/unit/archive/container.rs"]
mod tests;
