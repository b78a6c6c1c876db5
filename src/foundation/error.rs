/// Convenience result type used across gridfx.
pub type GridFxResult<T> = Result<T, GridFxError>;

/// Top-level error taxonomy.
///
/// None of these ever reach the host page through the lifecycle entry points; they surface
/// from configuration loading and from the pure building blocks.
#[derive(thiserror::Error, Debug)]
pub enum GridFxError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The container has not been laid out yet (or is below the sanity threshold).
    #[error("container not ready: {width}x{height}")]
    NotReady {
        /// Measured width in pixels.
        width: f64,
        /// Measured height in pixels.
        height: f64,
    },

    /// Errors while building or sampling tweens and easings.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while building or resolving a scroll timeline.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors when serializing or deserializing definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridFxError {
    /// Build a [`GridFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridFxError::NotReady`] value.
    pub fn not_ready(width: f64, height: f64) -> Self {
        Self::NotReady { width, height }
    }

    /// Build a [`GridFxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GridFxError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`GridFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the recoverable "container not laid out yet" condition.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
