/// Raster formats the toolset reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Portable Network Graphics.
    Png,
    /// JPEG (`.jpg` / `.jpeg`).
    Jpeg,
    /// WebP.
    Webp,
}

impl ImageKind {
    /// Match a bare extension (no dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Infer the format from a file or archive entry name.
    pub fn from_name(name: &str) -> Option<Self> {
        extension_of(name).and_then(Self::from_extension)
    }

    /// MIME type used in data URIs.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Canonical extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Final extension of the last path component, without the dot.
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Replace the final extension of `name` (or append one when there is none).
pub fn with_extension(name: &str, ext: &str) -> String {
    match extension_of(name) {
        Some(old) => format!("{}.{ext}", &name[..name.len() - old.len() - 1]),
        None => format!("{name}.{ext}"),
    }
}
