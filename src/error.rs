//! Error handling for the match agent client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized shape of a failed API request. Every transport or server
/// failure reaching a caller is reduced to this one form, so call sites
/// never distinguish a network fault from a server-reported one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// Human-readable message, preferring the server's `detail` field.
    pub message: String,
    /// HTTP status code when the server responded at all.
    pub status: Option<u16>,
    /// Raw response body when one was received.
    pub data: Option<serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum MatchAgentError {
    /// Recommendation request issued without a resume file identifier.
    #[error("MISSING_RESUME_FILE")]
    MissingResumeFile,

    /// Report request issued without a resume file or job id.
    #[error("MISSING_REPORT_PARAMS")]
    MissingReportParams,

    /// Upload argument is not an existing regular file.
    #[error("INVALID_FILE")]
    InvalidFile,

    /// Store action requires an uploaded resume but none is present.
    #[error("RESUME_NOT_AVAILABLE")]
    ResumeNotAvailable,

    /// Report action invoked with an empty job id.
    #[error("MISSING_JOB_ID")]
    MissingJobId,

    #[error("{}", .0.message)]
    Api(ApiFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchAgentError>;

impl MatchAgentError {
    /// Snapshot of this error in the normalized failure shape, suitable
    /// for the store's error slot. Validation errors carry their fixed
    /// code as the message with no status or body.
    pub fn failure(&self) -> ApiFailure {
        match self {
            MatchAgentError::Api(failure) => failure.clone(),
            other => ApiFailure {
                message: other.to_string(),
                status: None,
                data: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_fixed_codes() {
        assert_eq!(
            MatchAgentError::MissingResumeFile.to_string(),
            "MISSING_RESUME_FILE"
        );
        assert_eq!(
            MatchAgentError::MissingReportParams.to_string(),
            "MISSING_REPORT_PARAMS"
        );
        assert_eq!(MatchAgentError::InvalidFile.to_string(), "INVALID_FILE");
        assert_eq!(
            MatchAgentError::ResumeNotAvailable.to_string(),
            "RESUME_NOT_AVAILABLE"
        );
        assert_eq!(MatchAgentError::MissingJobId.to_string(), "MISSING_JOB_ID");
    }

    #[test]
    fn test_failure_snapshot_of_api_error() {
        let failure = ApiFailure {
            message: "server exploded".to_string(),
            status: Some(500),
            data: Some(serde_json::json!({"detail": "server exploded"})),
        };
        let error = MatchAgentError::Api(failure.clone());

        assert_eq!(error.failure(), failure);
        assert_eq!(error.to_string(), "server exploded");
    }

    #[test]
    fn test_failure_snapshot_of_validation_error() {
        let snapshot = MatchAgentError::MissingJobId.failure();

        assert_eq!(snapshot.message, "MISSING_JOB_ID");
        assert_eq!(snapshot.status, None);
        assert_eq!(snapshot.data, None);
    }
}
