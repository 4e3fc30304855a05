//! Error types shared across the client.
//!
//! Taxonomy:
//! - transport/timeout failures surface as [`ApiError::Http`], never retried
//!   by the gateway;
//! - non-401 HTTP errors surface as [`ApiError::Status`] with the backend's
//!   `message` payload verbatim when present;
//! - a 401 that survives the gateway's single refresh-and-retry cycle
//!   surfaces as the terminal [`ApiError::Unauthenticated`];
//! - body decode failures surface as [`ApiError::Decode`].

use serde::Deserialize;
use thiserror::Error;

/// Failures while assembling the client itself.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from calls through the HTTP gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status other than 401.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend error message, or a generic fallback.
        message: String,
    },

    /// The request stayed unauthorized through the refresh discipline.
    /// Terminal for this call; the gateway never retries it again.
    #[error("session expired, sign in again")]
    Unauthenticated,

    /// The response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status this error carries, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for client-side validation failures (4xx other than 401).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 400 && *status < 500)
    }
}

/// Error payload shape used by the backend for all error responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the backend's error message from a response body.
///
/// Falls back to the raw body (truncated) and finally to a generic message,
/// so the caller always has something presentable.
#[must_use]
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.message.is_empty()
    {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "server error".to_owned()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_payload() {
        assert_eq!(
            error_message("{\"message\":\"duplicate slug\"}"),
            "duplicate slug"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(""), "server error");
        assert_eq!(error_message("   "), "server error");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        // Empty message field falls through to the raw body.
        assert_eq!(
            error_message("{\"message\":\"\"}"),
            "{\"message\":\"\"}"
        );
    }

    #[test]
    fn test_status_classification() {
        let err = ApiError::Status {
            status: 422,
            message: "invalid".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert!(err.is_validation());

        let err = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert!(!err.is_validation());
        assert!(ApiError::Unauthenticated.status().is_none());
    }
}
