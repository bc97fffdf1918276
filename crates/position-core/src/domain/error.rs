//! Domain Errors
//!
//! One error type for the remote collection, the cascade and field checks.

use thiserror::Error;

/// Common result type for position operations
pub type PositionResult<T> = Result<T, PositionError>;

/// Errors raised while talking to the positions collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Network or transport failure, no response was received
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The collection answered with a non-2xx status
    #[error("Remote rejected request ({status}): {message}")]
    RemoteRejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The requested id is absent from the collection
    #[error("Position {0} not found")]
    NotFound(u32),

    /// A field constraint was violated
    #[error("{0}")]
    ValidationFailed(String),

    /// A successful response carried a body that does not decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Some deletes of a cascading delete failed; the rest may have committed
    #[error("Cascading delete failed for {failed:?} of {attempted} positions: {cause}")]
    PartialDelete {
        /// Ids whose delete request failed
        failed: Vec<u32>,
        /// Number of delete requests issued
        attempted: usize,
        /// First underlying failure
        cause: Box<PositionError>,
    },

    /// Configuration could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PositionError {
    /// True for failures that came back from (or never reached) the remote collection
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            PositionError::RemoteUnavailable(_)
                | PositionError::RemoteRejected { .. }
                | PositionError::NotFound(_)
                | PositionError::InvalidResponse(_)
                | PositionError::PartialDelete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_delete_message() {
        let err = PositionError::PartialDelete {
            failed: vec![3],
            attempted: 4,
            cause: Box::new(PositionError::RemoteUnavailable("connection reset".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Cascading delete failed for [3] of 4 positions: Remote unavailable: connection reset"
        );
        assert!(err.is_remote());
    }

    #[test]
    fn test_validation_is_not_remote() {
        let err = PositionError::ValidationFailed("Name is required".to_string());
        assert_eq!(err.to_string(), "Name is required");
        assert!(!err.is_remote());
    }
}
