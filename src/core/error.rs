use thiserror::Error;

/// Errors surfaced by the billing core and its collaborators.
///
/// Each kind is handled at the boundary closest to the user action:
/// validation failures block the action locally, remote failures carry the
/// backend's message when it supplied one, render failures never leave a
/// partial output file behind. Nothing is retried automatically.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtelierError {
    /// The request is invalid before anything is sent to the backend
    /// (e.g. no interventions selected).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A gateway call failed — network error or a non-success response.
    /// `message` is the backend's own error text when available.
    #[error("remote error: {message}")]
    Remote {
        /// HTTP status, if a response was received.
        status: Option<u16>,
        message: String,
    },

    /// Document construction or rendering failed.
    #[error("render error: {0}")]
    Render(String),
}

impl AtelierError {
    /// Remote error without an HTTP status (connection-level failure).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Remote error from a non-success HTTP response.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status: Some(status),
            message: message.into(),
        }
    }
}
