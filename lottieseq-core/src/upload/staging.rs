use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    archive::container::ArchiveEntry,
    foundation::error::{LottieSeqError, LottieSeqResult},
};

/// Normalize an archive entry name into a relative path that stays inside its root.
///
/// Backslashes are treated as separators; empty and `.` components are dropped.
/// Absolute names, a drive prefix (`C:`) on the first component and `..` components
/// are rejected. A colon anywhere else is an ordinary file name character.
pub fn staged_rel_path(name: &str) -> LottieSeqResult<String> {
    let s = name.replace('\\', "/");
    if s.starts_with('/') {
        return Err(LottieSeqError::input(format!(
            "archive entry '{name}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." || (out.is_empty() && has_drive_prefix(part)) {
            return Err(LottieSeqError::input(format!(
                "archive entry '{name}' escapes the staging directory"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LottieSeqError::input(format!(
            "archive entry '{name}' has no file name"
        )));
    }
    Ok(out.join("/"))
}

fn has_drive_prefix(part: &str) -> bool {
    let b = part.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

/// Scratch directory holding uploaded entries while they are decoded.
///
/// The directory and everything in it is removed when the value is dropped.
pub(crate) struct StagingArea {
    dir: tempfile::TempDir,
}

impl StagingArea {
    pub(crate) fn new(root: Option<&Path>) -> LottieSeqResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("lottieseq-upload-");
        let dir = match root {
            Some(root) => builder
                .tempdir_in(root)
                .with_context(|| format!("create staging dir in '{}'", root.display()))?,
            None => builder.tempdir().context("create staging dir")?,
        };
        tracing::debug!(path = %dir.path().display(), "staging dir created");
        Ok(Self { dir })
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write one entry below the staging root and return its path.
    pub(crate) fn stage(&self, entry: &ArchiveEntry) -> LottieSeqResult<PathBuf> {
        let rel = staged_rel_path(&entry.name)?;
        let path = self.dir.path().join(&rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create staging folder for '{rel}'"))?;
        }
        std::fs::write(&path, entry.contents()?).with_context(|| format!("stage '{rel}'"))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/upload/staging.rs"]
mod tests;
