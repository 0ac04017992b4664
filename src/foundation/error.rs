/// Convenience result type used across Minds Eye.
pub type MindsEyeResult<T> = Result<T, MindsEyeError>;

/// Top-level error taxonomy used by recorder, player and persistence APIs.
///
/// Every variant is a user-facing, local failure: the operation that produced it has
/// left the animation state exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum MindsEyeError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A recorder transition was requested in a state that does not allow it.
    #[error("recording error: {0}")]
    Recording(String),

    /// Playback could not start or continue.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing animation documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MindsEyeError {
    /// Build a [`MindsEyeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MindsEyeError::Recording`] value.
    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording(msg.into())
    }

    /// Build a [`MindsEyeError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`MindsEyeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
