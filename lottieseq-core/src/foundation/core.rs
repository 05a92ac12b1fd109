use crate::foundation::error::{LottieSeqError, LottieSeqResult};

/// Zero-based frame position on the animation timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame covered by the window.
    pub start: FrameIndex,
    /// First frame after the window.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> LottieSeqResult<Self> {
        if start.0 > end.0 {
            return Err(LottieSeqError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// The single-frame window `[frame, frame + 1)`.
    pub fn single(frame: FrameIndex) -> Self {
        Self {
            start: frame,
            end: FrameIndex(frame.0.saturating_add(1)),
        }
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether the window covers no frame at all.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Whether `f` falls inside the window.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Integer playback rate in frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Fps(u32);

impl Fps {
    /// Slowest rate accepted by the assembly boundary.
    pub const MIN: u32 = 1;
    /// Fastest rate accepted by the assembly boundary.
    pub const MAX: u32 = 60;

    /// Build an exact frame rate; zero is rejected.
    pub fn new(fps: u32) -> LottieSeqResult<Self> {
        if fps == 0 {
            return Err(LottieSeqError::parameter("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Clamp any integer into `[MIN, MAX]`.
    pub fn clamped(fps: i64) -> Self {
        Self(fps.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u32)
    }

    /// Parse a textual form field and clamp it.
    ///
    /// Leading/trailing whitespace is ignored; anything that is not an integer is a
    /// [`LottieSeqError::Parameter`].
    pub fn parse_clamped(raw: &str) -> LottieSeqResult<Self> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| LottieSeqError::parameter(format!("fps '{trimmed}' is not an integer")))?;
        Ok(Self::clamped(value))
    }

    /// Raw frames-per-second value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Seconds covered by `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) / f64::from(self.0)
    }

    /// Frame index reached after `secs` seconds (floored, never negative).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * f64::from(self.0)).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(24)
    }
}

/// Pixel dimensions of the animation canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
