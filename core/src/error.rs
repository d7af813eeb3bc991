//! Error types for the shortener client.
//!
//! # Design
//! Three failure families reach the caller: the call never completed
//! (`Transport`, plus `Serialization` when the body could not even be built),
//! the reply made no sense (`Protocol`), or the service said no (`Service`).
//! `user_message` collapses them into the strings a host shows to its users;
//! the variant payloads are for logs only.

use thiserror::Error;

/// Shown for any failure before a reply was received.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error calling API service.";

/// Shown when a reply arrived but carried neither a short URL nor an error.
pub const PROTOCOL_ERROR_MESSAGE: &str = "Error parsing API response.";

/// Errors produced while building, sending or parsing a shorten call.
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The body was not JSON, was `null`, or lacked the success markers.
    #[error("unexpected response (HTTP {status}): {body}")]
    Protocol { status: u16, body: String },

    /// The service reported an explicit error message. `body` is the raw reply.
    #[error("service error (HTTP {status}): {message}")]
    Service { status: u16, message: String, body: String },
}

impl ShortenError {
    pub fn user_message(&self) -> String {
        match self {
            ShortenError::Transport(_) | ShortenError::Serialization(_) => {
                TRANSPORT_ERROR_MESSAGE.to_string()
            }
            ShortenError::Protocol { .. } => PROTOCOL_ERROR_MESSAGE.to_string(),
            ShortenError::Service { message, .. } => message.clone(),
        }
    }
}

/// Errors raised while loading `ShortenerConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
}
