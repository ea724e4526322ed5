//! Client error types.
//!
//! Errors are categorized by how the caller recovers:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Validation** | `EmptyUrl`, `SubmissionInFlight` | Edit input / wait; no request was sent |
//! | **Submission** | `Submission` | Resubmit |
//! | **Service** | `Transport`, `Api` | Resubmit |
//! | **Config** | `Configuration` | Fix environment |
//!
//! A failed status poll is deliberately NOT a variant: it terminates the
//! tracked job (`Failed` status, [`POLL_FAILURE_MESSAGE`]) instead of
//! surfacing to the caller. Every other failure path ends in a displayed
//! message and a state the user can act from.

use thiserror::Error;

/// Message attached to a job terminated by a failed status fetch.
pub const POLL_FAILURE_MESSAGE: &str = "Failed to fetch download status";

/// Fallback detail when a failed creation carries no server-provided detail.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Download failed. Please try again.";

/// Errors produced by submission and service calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    // ── Validation (caught before any network call) ──────────────────
    /// The URL was empty after trimming.
    #[error("Please enter a valid URL")]
    EmptyUrl,

    /// A creation call is already outstanding.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    // ── Submission ───────────────────────────────────────────────────
    /// The creation call failed; carries the user-visible detail.
    #[error("{0}")]
    Submission(String),

    // ── Service ──────────────────────────────────────────────────────
    /// Transport-level failure: connect, timeout, or body decode.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `detail` string from the error body, if any.
        detail: Option<String>,
    },

    // ── Config ───────────────────────────────────────────────────────
    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Returns `true` when the user can act (edit input, resubmit) without
    /// reconfiguring the client.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }

    /// User-visible detail for a failed submission attempt.
    ///
    /// The server's `detail` string when present, else the generic retry
    /// message.
    pub fn submission_detail(&self) -> String {
        match self {
            Self::EmptyUrl | Self::SubmissionInFlight => self.to_string(),
            Self::Submission(detail) => detail.clone(),
            Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_SUBMISSION_FAILURE.to_string(),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
