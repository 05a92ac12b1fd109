//! Per-pixel photographic adjustments shared by preview and batch processing.

pub(crate) mod params;
pub(crate) mod pipeline;
