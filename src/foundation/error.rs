/// Convenience result type used across the crate.
pub type DotcloudResult<T> = Result<T, DotcloudError>;

/// Top-level error type for dotcloud APIs.
#[derive(thiserror::Error, Debug)]
pub enum DotcloudError {
    /// Input or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not carry out a request.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error from lower-level dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotcloudError {
    /// Build a [`DotcloudError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotcloudError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotcloudError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
