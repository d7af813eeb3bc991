//! Single-use shortener call with captured outcome.
//!
//! A `ShortenerProxy` performs its one call while being constructed and
//! keeps either the short URL or a user-facing error message. Nothing is
//! returned as `Err`: hosts check `is_error()` afterwards.

use tracing::{error, warn};

use crate::client::ShortenClient;
use crate::config::ShortenerConfig;
use crate::error::ShortenError;
use crate::transport::{Transport, UreqTransport};
use crate::types::ShortenOutcome;

#[derive(Debug, Clone)]
pub struct ShortenerProxy {
    outcome: ShortenOutcome,
}

impl ShortenerProxy {
    /// Shorten `longlink` over HTTP using `config`. Blocks until done.
    pub fn new(config: &ShortenerConfig, longlink: &str) -> Self {
        let client = ShortenClient::new(&config.api_base_url, &config.api_key);
        Self::with_transport(&client, &UreqTransport::new(), longlink)
    }

    pub fn with_transport<T: Transport>(client: &ShortenClient, transport: &T, longlink: &str) -> Self {
        let outcome = match shorten(client, transport, longlink) {
            Ok(url) => ShortenOutcome::Shortened(url),
            Err(err) => {
                log_failure(client, &err);
                ShortenOutcome::Failed(err.user_message())
            }
        };
        Self { outcome }
    }

    /// The short URL, or `""` if the call failed.
    pub fn url(&self) -> &str {
        match &self.outcome {
            ShortenOutcome::Shortened(url) => url,
            ShortenOutcome::Failed(_) => "",
        }
    }

    /// The error message, or `""` if the call succeeded.
    pub fn error(&self) -> &str {
        match &self.outcome {
            ShortenOutcome::Failed(message) => message,
            ShortenOutcome::Shortened(_) => "",
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error().is_empty()
    }

    pub fn outcome(&self) -> &ShortenOutcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> ShortenOutcome {
        self.outcome
    }
}

fn shorten<T: Transport>(client: &ShortenClient, transport: &T, longlink: &str) -> Result<String, ShortenError> {
    let request = client.build_shorten(longlink)?;
    let response = transport.execute(request)?;
    client.parse_shorten(response)
}

fn log_failure(client: &ShortenClient, err: &ShortenError) {
    match err {
        ShortenError::Transport(detail) | ShortenError::Serialization(detail) => {
            error!(base_url = client.base_url(), %detail, "API call error");
        }
        ShortenError::Protocol { status, body } => {
            warn!(status, %body, "API response");
        }
        ShortenError::Service { status, message, body } => {
            warn!(status, %message, %body, "API response");
        }
    }
}
