//! Error types for the recipe client.
//!
//! This module defines the centralized error type [`RecipeClientError`], a
//! [`Result`] alias, and the cloneable [`ErrorReport`] that travels inside
//! worker responses. All errors are implemented with `thiserror`.
//!
//! # Taxonomy
//!
//! Every error falls into one [`ErrorKind`]:
//!
//! - **Validation**: user input rejected by business rules (local or backend)
//! - **Transport**: the request never produced a usable response
//! - **Backend**: the service answered with a non-2xx status or a malformed body
//! - **Local**: configuration, filesystem, theme, or worker plumbing
//!
//! None of them is fatal to the session; the controller turns each into
//! inline feedback or a transient notification and re-enables the form.

use thiserror::Error;

/// The main error type for recipe client operations.
///
/// # Examples
///
/// ```
/// use recipe_client::RecipeClientError;
///
/// let err = RecipeClientError::Backend {
///     status: 500,
///     message: Some("model unavailable".to_string()),
/// };
/// assert_eq!(err.backend_message(), Some("model unavailable"));
/// ```
#[derive(Debug, Error)]
pub enum RecipeClientError {
    /// Input was rejected before or by the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The HTTP request failed to complete (connection refused, reset, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` holds the `error` field of the JSON body when one was sent.
    #[error("Backend error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the backend, if any.
        message: Option<String>,
    },

    /// A success response carried a body that did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The event channel between the worker and the controller is closed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A star rating outside `1..=5`.
    #[error("Invalid rating {0}: must be between 1 and 5 stars")]
    InvalidRating(u8),
}

impl RecipeClientError {
    /// Classifies the error into the client's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidRating(_) => ErrorKind::Validation,
            Self::Network(_) => ErrorKind::Transport,
            Self::Backend { .. } | Self::Decode(_) => ErrorKind::Backend,
            Self::Io(_) | Self::Theme(_) | Self::Config(_) | Self::Worker(_) => ErrorKind::Local,
        }
    }

    /// Returns the backend-supplied message, if the backend sent one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Broad error classes driving how a failure is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected; shown inline, retry allowed.
    Validation,
    /// Request did not complete; shown as a transient notification.
    Transport,
    /// Service reported an application error; its message is shown verbatim.
    Backend,
    /// Client-side plumbing failure.
    Local,
}

/// Cloneable summary of an error, carried in worker responses and events.
///
/// `detail` is only set when the text is meant for the user: a backend
/// `error` message or a validation message. Transport and local failures
/// leave it empty so the caller picks a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub detail: Option<String>,
}

impl ErrorReport {
    /// Returns `detail` when present, otherwise `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<&RecipeClientError> for ErrorReport {
    fn from(err: &RecipeClientError) -> Self {
        let detail = match err {
            RecipeClientError::Validation(msg) => Some(msg.clone()),
            RecipeClientError::Backend { message, .. } => message.clone(),
            RecipeClientError::InvalidRating(_) => Some(err.to_string()),
            _ => None,
        };
        Self {
            kind: err.kind(),
            detail,
        }
    }
}

/// A specialized `Result` type for recipe client operations.
pub type Result<T> = std::result::Result<T, RecipeClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_report_keeps_message_verbatim() {
        let err = RecipeClientError::Backend {
            status: 500,
            message: Some("model unavailable".to_string()),
        };
        let report = ErrorReport::from(&err);
        assert_eq!(report.kind, ErrorKind::Backend);
        assert_eq!(report.message_or("Failed to generate recipe"), "model unavailable");
    }

    #[test]
    fn backend_without_message_uses_fallback() {
        let err = RecipeClientError::Backend {
            status: 502,
            message: None,
        };
        let report = ErrorReport::from(&err);
        assert_eq!(report.message_or("Failed to save recipe"), "Failed to save recipe");
        assert_eq!(err.to_string(), "Backend error (502): no message");
    }

    #[test]
    fn local_errors_carry_no_user_detail() {
        let err = RecipeClientError::Worker("channel closed".to_string());
        let report = ErrorReport::from(&err);
        assert_eq!(report.kind, ErrorKind::Local);
        assert!(report.detail.is_none());
    }

    #[test]
    fn invalid_rating_is_a_validation_error() {
        let err = RecipeClientError::InvalidRating(7);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            ErrorReport::from(&err).detail.as_deref(),
            Some("Invalid rating 7: must be between 1 and 5 stars")
        );
    }
}
