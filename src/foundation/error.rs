/// Convenience result type used across the mosaic core.
pub type MosaicResult<T> = Result<T, MosaicError>;

/// Top-level error taxonomy used by the layout and scheduling APIs.
#[derive(thiserror::Error, Debug)]
pub enum MosaicError {
    /// Invalid user-provided layout, canvas, or overlay data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A reveal window that cannot produce a well-ordered schedule.
    #[error("timing error: {0}")]
    Timing(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MosaicError {
    /// Build a [`MosaicError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MosaicError::Timing`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }
}
