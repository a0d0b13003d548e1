/// Errors raised by the recommendation core.
///
/// Business outcomes such as running out of spins are not errors; they are
/// returned as values by the rewards crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// An operation received input it strictly requires and cannot default.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The learned scorer failed to initialize or predict.
    #[error("learned scorer unavailable: {0}")]
    ModelUnavailable(String),
    /// The external store could not be read.
    #[error("storage read failed for `{key}`: {reason}")]
    StorageRead {
        /// Logical key being read.
        key: String,
        /// Underlying failure description.
        reason: String,
    },
}

impl HubError {
    /// Whether the caller is expected to recover by falling back to the heuristic scorer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HubError::ModelUnavailable(_))
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, HubError>;
