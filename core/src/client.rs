//! Stateless HTTP request builder and response parser for the shortener API.
//!
//! # Design
//! `ShortenClient` holds the base address and the API key and nothing else.
//! `build_shorten` produces an `HttpRequest`, `parse_shorten` consumes an
//! `HttpResponse`; the round-trip in between belongs to a `Transport`. The
//! status code is logged but never decides the outcome: the service answers
//! rejected keys and taken ids with a JSON body on a 4xx status, and that
//! body is what the caller needs to see.

use serde_json::Value;

use crate::error::ShortenError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ShortenRequest, ShortenResponse};

/// Path of the link creation endpoint, relative to the base address.
pub const NEW_LINK_PATH: &str = "/api/new";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Synchronous, stateless client for the shortener API.
#[derive(Debug, Clone)]
pub struct ShortenClient {
    base_url: String,
    api_key: String,
}

impl ShortenClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_shorten(&self, longlink: &str) -> Result<HttpRequest, ShortenError> {
        let body = serde_json::to_string(&ShortenRequest::auto(longlink))
            .map_err(|e| ShortenError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{NEW_LINK_PATH}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), self.api_key.clone()),
            ],
            body: Some(body),
        })
    }

    /// Extract the short URL from a reply, or classify why there is none.
    pub fn parse_shorten(&self, response: HttpResponse) -> Result<String, ShortenError> {
        let HttpResponse { status, body, .. } = response;

        let decoded = match serde_json::from_str::<Value>(&body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value::<ShortenResponse>(value).ok(),
            _ => None,
        };
        let Some(decoded) = decoded else {
            return Err(ShortenError::Protocol { status, body });
        };

        if let Some(url) = decoded.short_url() {
            return Ok(url.to_string());
        }
        match decoded.error {
            Some(message) if !message.is_empty() => Err(ShortenError::Service { status, message, body }),
            _ => Err(ShortenError::Protocol { status, body }),
        }
    }
}
