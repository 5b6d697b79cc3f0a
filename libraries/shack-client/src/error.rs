//! Error types for the MusicShack client.

use thiserror::Error;

/// Errors that can occur when talking to a MusicShack server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not JSON, or not the expected success shape
    #[error("Malformed response ({status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    /// Server reported an error, either with a non-2xx status or an `{error}` envelope.
    /// `message` is the server's own text, `None` when it sent none.
    #[error("{}", server_message(.status, .message))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// Server answered 401; the login redirect has already been signalled
    #[error("Authentication required (login at {login_path})")]
    Unauthenticated { login_path: &'static str },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while preparing an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status attached to the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::MalformedResponse { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Unauthenticated { .. } => Some(401),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for the 401 signal.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// Collapse into the single message shown to the user.
    ///
    /// A message the server wrote itself wins; any other failure, including a
    /// bare failure status, is replaced by the operation's own `fallback` text.
    pub fn into_message(self, fallback: impl Into<String>) -> String {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } => message,
            _ => fallback.into(),
        }
    }
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("request failed with status {}", status),
    }
}

/// Result type for transport-level operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result of a domain operation: the value, or the message to show the user.
pub type Outcome<T = ()> = std::result::Result<T, String>;
