//! Client error handling
//!
//! Every failure an action can hit ends up here: transport problems,
//! non-success responses, undecodable bodies, precondition failures from the
//! state layer, and local store problems. The orchestrator catches these at
//! the action boundary and turns them into banner text.

use nutrilog_shared::StateError;
use thiserror::Error;

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Precondition(#[from] StateError),

    #[error("Local storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Text shown to the user. Server rejections are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { body, .. } => body.clone(),
            ClientError::Transport(err) => err.to_string(),
            other => other.to_string(),
        }
    }

    /// True when the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_body_verbatim() {
        let error = ClientError::Status {
            status: 404,
            body: r#"{"detail":"User not found"}"#.to_string(),
        };
        assert_eq!(error.user_message(), r#"{"detail":"User not found"}"#);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_precondition_message() {
        let error = ClientError::from(StateError::NoActiveUser);
        assert_eq!(error.user_message(), "Save your profile first");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_storage_message() {
        let error = ClientError::Storage("permission denied".to_string());
        assert_eq!(error.user_message(), "Local storage error: permission denied");
    }
}
