//! Failure classes for everything that talks to the backend.
//!
//! The variants matter more than the messages: callers branch on them to
//! decide whether to demote the session ([`ApiError::Auth`]), show a blocking
//! refusal ([`ApiError::Forbidden`] / [`ApiError::Validation`]), or keep
//! stale data and log ([`ApiError::Timeout`] / [`ApiError::Network`]).

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The credential is missing, expired, or was rejected.
    #[error("{0}")]
    Auth(String),

    /// The caller is not allowed to perform this action.
    #[error("{0}")]
    Forbidden(String),

    /// Rejected locally, before any remote call was made.
    #[error("{0}")]
    Validation(String),

    /// The request did not complete within the configured deadline.
    #[error("the request timed out")]
    Timeout,

    /// The backend could not be reached at all.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// True when the failure means the stored credential is no longer valid.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// True for the transport failure class: the call may have never reached
    /// the backend, so cached data is still the best thing to show.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Network(_))
    }
}
