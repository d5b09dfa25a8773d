/// Result alias used across the crate.
pub type AspectResult<T> = Result<T, AspectError>;

/// Errors raised while measuring, correcting or loading keyframe geometry.
#[derive(thiserror::Error, Debug)]
pub enum AspectError {
    /// Degenerate rectangle or non-positive aspect ratio; the correction cannot proceed.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Rotation or rescale produced coordinates that are not finite.
    #[error("transform failure: {0}")]
    TransformFailure(String),

    /// Malformed project document or output settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON read/write failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AspectError {
    /// Build an [`AspectError::InvalidGeometry`].
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build an [`AspectError::TransformFailure`].
    pub fn transform_failure(msg: impl Into<String>) -> Self {
        Self::TransformFailure(msg.into())
    }

    /// Build an [`AspectError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AspectError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for per-keyframe failures a batch skips over and keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidGeometry(_) | Self::TransformFailure(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
