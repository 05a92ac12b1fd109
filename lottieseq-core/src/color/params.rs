use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{LottieSeqError, LottieSeqResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// One full set of adjustment dial values.
///
/// The struct is `Copy` and every pipeline run takes its own value, so a run never sees
/// the dials change halfway through.
pub struct AdjustmentParameters {
    /// Additive brightness, scaled by 255. Range `[-1, 1]`.
    pub exposure: f64,
    /// Scale around mid-gray (128). Range `[0, 3]`.
    pub contrast: f64,
    /// Scale around the per-pixel channel average. Range `[0, 3]`.
    pub saturation: f64,
    /// Added to red, subtracted from blue. Range `[-100, 100]`.
    pub temperature: f64,
    /// Added to red and green. Range `[-100, 100]`.
    pub tint: f64,
    /// Push away from 128 for pixels with luma above 128. Range `[-1, 1]`.
    pub highlights: f64,
    /// Push away from 128 for pixels with luma at or below 128. Range `[-1, 1]`.
    pub shadows: f64,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            temperature: 0.0,
            tint: 0.0,
            highlights: 0.0,
            shadows: 0.0,
        }
    }
}

struct Dial {
    name: &'static str,
    min: f64,
    max: f64,
}

const EXPOSURE: Dial = Dial {
    name: "exposure",
    min: -1.0,
    max: 1.0,
};
const CONTRAST: Dial = Dial {
    name: "contrast",
    min: 0.0,
    max: 3.0,
};
const SATURATION: Dial = Dial {
    name: "saturation",
    min: 0.0,
    max: 3.0,
};
const TEMPERATURE: Dial = Dial {
    name: "temperature",
    min: -100.0,
    max: 100.0,
};
const TINT: Dial = Dial {
    name: "tint",
    min: -100.0,
    max: 100.0,
};
const HIGHLIGHTS: Dial = Dial {
    name: "highlights",
    min: -1.0,
    max: 1.0,
};
const SHADOWS: Dial = Dial {
    name: "shadows",
    min: -1.0,
    max: 1.0,
};

impl Dial {
    fn clamp(&self, v: f64, default: f64) -> f64 {
        if v.is_finite() {
            v.clamp(self.min, self.max)
        } else {
            default
        }
    }

    fn check(&self, v: f64) -> LottieSeqResult<()> {
        if !v.is_finite() || v < self.min || v > self.max {
            return Err(LottieSeqError::parameter(format!(
                "{} must be within [{}, {}], got {v}",
                self.name, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl AdjustmentParameters {
    /// Copy with every dial forced into its range; non-finite values fall back to the default.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            exposure: EXPOSURE.clamp(self.exposure, d.exposure),
            contrast: CONTRAST.clamp(self.contrast, d.contrast),
            saturation: SATURATION.clamp(self.saturation, d.saturation),
            temperature: TEMPERATURE.clamp(self.temperature, d.temperature),
            tint: TINT.clamp(self.tint, d.tint),
            highlights: HIGHLIGHTS.clamp(self.highlights, d.highlights),
            shadows: SHADOWS.clamp(self.shadows, d.shadows),
        }
    }

    /// Reject the first dial outside its range.
    pub fn validate(&self) -> LottieSeqResult<()> {
        EXPOSURE.check(self.exposure)?;
        CONTRAST.check(self.contrast)?;
        SATURATION.check(self.saturation)?;
        TEMPERATURE.check(self.temperature)?;
        TINT.check(self.tint)?;
        HIGHLIGHTS.check(self.highlights)?;
        SHADOWS.check(self.shadows)
    }

    /// Whether every dial sits at its neutral default.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Parse parameters from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> LottieSeqResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LottieSeqError::serde(format!("invalid adjustment parameters: {e}")))
    }

    /// Read parameters from a JSON file.
    pub fn from_path(path: &Path) -> LottieSeqResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read adjustment parameters '{}'", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/params.rs"]
mod tests;
