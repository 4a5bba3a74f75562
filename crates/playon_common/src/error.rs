// --- File: crates/playon_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all PlayOn client errors.
///
/// Crates with their own error enums implement `From<TheirError> for PlayonError`
/// so everything surfaces to the presentation layer as one type.
#[derive(Error, Debug)]
pub enum PlayonError {
    /// The API was unreachable or answered with a non-success status
    #[error("Network failure: {0}")]
    NetworkError(String),

    /// The API answered, but the payload could not be understood
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The user's input was rejected before anything was sent
    #[error("{0}")]
    ValidationError(String),

    /// No user is signed in, or the credentials were refused
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PlayonError {
    /// Whether the same request may succeed if the user simply tries again.
    ///
    /// Only transport failures qualify; validation errors need the user to
    /// change their input first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PlayonError::NetworkError(_))
    }

    /// Whether a read path should swallow this error and render an empty list.
    pub fn degrades_to_empty(&self) -> bool {
        matches!(
            self,
            PlayonError::NetworkError(_) | PlayonError::MalformedResponse(_)
        )
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, PlayonError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, PlayonError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, PlayonError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| PlayonError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, PlayonError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| PlayonError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for PlayonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlayonError::MalformedResponse(err.to_string())
        } else {
            PlayonError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PlayonError {
    fn from(err: serde_json::Error) -> Self {
        PlayonError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for PlayonError {
    fn from(err: std::io::Error) -> Self {
        PlayonError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::NotFound(message.to_string())
}

pub fn malformed_response<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::MalformedResponse(message.to_string())
}

pub fn network_error<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::NetworkError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::AuthError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> PlayonError {
    PlayonError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(network_error("HTTP 503").is_retryable());
        assert!(!malformed_response("not json").is_retryable());
        assert!(!validation_error("pick consecutive hours").is_retryable());
    }

    #[test]
    fn test_read_path_degradation() {
        assert!(network_error("down").degrades_to_empty());
        assert!(malformed_response("garbage").degrades_to_empty());
        assert!(!auth_error("signed out").degrades_to_empty());
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = validation_error("Selecione horários consecutivos");
        assert_eq!(err.to_string(), "Selecione horários consecutivos");
    }

    #[test]
    fn test_context_wraps_as_internal() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = result.context("saving session").unwrap_err();
        assert!(matches!(err, PlayonError::InternalError(ref m) if m == "saving session: disk full"));
    }

    #[test]
    fn test_serde_json_error_is_malformed() {
        let err: PlayonError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PlayonError::MalformedResponse(_)));
    }
}
