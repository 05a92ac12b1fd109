use crate::{
    archive::container::ArchiveEntry,
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::kind::extension_of,
    sequence::natural::natural_cmp,
};

/// Case-insensitive extension allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: &'static [&'static str],
}

impl ExtensionFilter {
    /// Frames accepted when building a Lottie document.
    pub const LOTTIE: Self = Self::new(&["png", "jpg", "jpeg"]);
    /// Images accepted by the adjustment preview and batch filter.
    pub const ADJUST: Self = Self::new(&["png", "jpg", "jpeg", "webp"]);
    /// Sources accepted by the WebP conversion.
    pub const WEBP_SOURCE: Self = Self::new(&["png"]);

    /// Build a filter from lowercase extensions without dots.
    pub const fn new(extensions: &'static [&'static str]) -> Self {
        Self { extensions }
    }

    /// Allowed extensions.
    pub fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    /// Whether a file name carries one of the allowed extensions.
    pub fn matches(&self, name: &str) -> bool {
        let Some(ext) = extension_of(name) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Whether an archive entry qualifies. Directories never do.
    pub fn accepts(&self, entry: &ArchiveEntry) -> bool {
        !entry.is_dir && !entry.name.ends_with('/') && self.matches(&entry.name)
    }
}

/// Keep the names accepted by `filter`, in natural order.
///
/// Names ending in `/` are folder entries and are skipped. An empty result is an
/// [`LottieSeqError::Input`] so that nothing downstream ever runs on zero frames.
pub fn select_names<'a, I>(names: I, filter: &ExtensionFilter) -> LottieSeqResult<Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<&str> = names
        .into_iter()
        .filter(|n| !n.ends_with('/') && filter.matches(n))
        .collect();
    if out.is_empty() {
        return Err(no_qualifying_images(filter));
    }
    out.sort_by(|a, b| natural_cmp(a, b));
    Ok(out)
}

/// Keep the archive entries accepted by `filter`, in natural order of their names.
pub fn order_entries(
    entries: Vec<ArchiveEntry>,
    filter: &ExtensionFilter,
) -> LottieSeqResult<Vec<ArchiveEntry>> {
    let total = entries.len();
    let mut out: Vec<ArchiveEntry> = entries.into_iter().filter(|e| filter.accepts(e)).collect();
    if out.is_empty() {
        return Err(no_qualifying_images(filter));
    }
    out.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    tracing::debug!(total, kept = out.len(), "ordered archive entries");
    Ok(out)
}

fn no_qualifying_images(filter: &ExtensionFilter) -> LottieSeqError {
    LottieSeqError::input(format!(
        "no qualifying images found (accepted extensions: {})",
        filter.extensions.join(", ")
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/orderer.rs"]
mod tests;
