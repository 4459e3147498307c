/// Convenience result type used across the crate.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy for decoding, conversion and the frame pipeline.
///
/// Every variant is fatal for the current run; nothing in the crate retries.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Malformed or unsupported raster image container.
    #[error("format error: {0}")]
    Format(String),

    /// A file or stream could not be opened, read or written.
    #[error("io error: {context}: {source}")]
    Io {
        /// What the crate was doing when the IO call failed.
        context: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A frame's luma plane was read but its chroma planes were truncated.
    #[error("stream corruption: {0}")]
    StreamCorruption(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A caller-side precondition does not hold.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build an [`OverlayError::Io`] value.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build an [`OverlayError::StreamCorruption`] value.
    pub fn stream_corruption(msg: impl Into<String>) -> Self {
        Self::StreamCorruption(msg.into())
    }

    /// Build an [`OverlayError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
