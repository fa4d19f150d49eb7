//! Unified error taxonomy for every client operation.
//!
//! One enum covers validation, transport, backend rejection, task
//! failure, and timeout, so callers always get a typed result instead
//! of per-endpoint ad hoc handling.

use std::time::Duration;

use floe_core::error::CoreError;

/// Errors returned by [`crate::TaskClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The payload failed pre-transmission validation. Never retried;
    /// no request was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered 2xx but the envelope reported
    /// `success = false`. Distinct from transport failure: the
    /// request arrived and was refused.
    #[error("Backend rejected the request: {message}")]
    Rejected {
        /// The envelope's `message` field.
        message: String,
    },

    /// The envelope reported success but carried no `data` payload
    /// where one was required.
    #[error("Backend response was missing the data payload")]
    MissingData,

    /// The task reached the `FAILED` terminal state. This is a
    /// successful poll reporting business failure; never retried.
    #[error("Task failed: {message}")]
    TaskFailed {
        /// Failure message reported by the backend.
        message: String,
    },

    /// The polling budget elapsed while the task was still running.
    /// Recoverable: the handle stays valid and polling may resume.
    #[error("Task still running after {elapsed:?}")]
    TimeoutExceeded {
        /// Time spent polling before giving up.
        elapsed: Duration,
    },
}

impl ClientError {
    /// HTTP status associated with this error, when there is one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a polling loop may retry after this error.
    ///
    /// Only transport-level failures are transient; validation,
    /// rejection, task failure, and timeout are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Request(_) | ClientError::Api { .. })
    }

    /// One user-facing message per error, selected by HTTP status for
    /// transport failures.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "Please fill in required analysis parameters",
            ClientError::Request(_) | ClientError::Api { .. } => {
                match self.http_status() {
                    Some(401) => "Authentication expired",
                    Some(403) => "Access forbidden",
                    Some(404) => "Requested endpoint not found",
                    Some(500) => "Server error, please try again later",
                    _ => "Network problem, please check your connection",
                }
            }
            ClientError::Rejected { .. } => "Failed to submit analysis request, please retry",
            ClientError::MissingData => "Incorrect data format returned",
            ClientError::TaskFailed { .. } => "Task processing failed",
            ClientError::TimeoutExceeded { .. } => "Task processing, continuing polling...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ClientError {
        ClientError::Api {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn status_messages_follow_the_http_code() {
        assert_eq!(api(401).user_message(), "Authentication expired");
        assert_eq!(api(403).user_message(), "Access forbidden");
        assert_eq!(api(404).user_message(), "Requested endpoint not found");
        assert_eq!(api(500).user_message(), "Server error, please try again later");
        assert_eq!(
            api(502).user_message(),
            "Network problem, please check your connection"
        );
    }

    #[test]
    fn transport_errors_are_transient() {
        assert!(api(500).is_transient());
    }

    #[test]
    fn terminal_errors_are_not_transient() {
        let failed = ClientError::TaskFailed {
            message: "bad input".into(),
        };
        assert!(!failed.is_transient());

        let validation: ClientError = CoreError::Validation("missing".into()).into();
        assert!(!validation.is_transient());

        let timeout = ClientError::TimeoutExceeded {
            elapsed: Duration::from_secs(1),
        };
        assert!(!timeout.is_transient());
    }

    #[test]
    fn api_error_exposes_its_status() {
        assert_eq!(api(404).http_status(), Some(404));
        assert_eq!(ClientError::MissingData.http_status(), None);
    }
}
