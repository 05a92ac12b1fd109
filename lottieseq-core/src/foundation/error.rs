/// Convenience result type used across lottieseq.
pub type LottieSeqResult<T> = Result<T, LottieSeqError>;

/// Top-level error taxonomy used by the conversion and batch APIs.
#[derive(thiserror::Error, Debug)]
pub enum LottieSeqError {
    /// Unusable input: no qualifying images, malformed archive, empty frames.
    #[error("input error: {0}")]
    Input(String),

    /// The codec could not parse or produce an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Frame rate or adjustment value outside its accepted range.
    #[error("parameter error: {0}")]
    Parameter(String),

    /// A batch finished with some items failed or skipped.
    #[error("partial batch failure: {failed} of {total} images were not processed")]
    PartialBatch {
        /// Number of items that failed or were skipped.
        failed: usize,
        /// Number of items submitted to the batch.
        total: usize,
    },

    /// A Lottie document violates a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing JSON documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LottieSeqError {
    /// Build a [`LottieSeqError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`LottieSeqError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LottieSeqError::Parameter`] value.
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Build a [`LottieSeqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LottieSeqError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error was caused by caller-supplied data rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::Decode(_) | Self::Parameter(_) | Self::Validation(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
