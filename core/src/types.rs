//! Wire DTOs for the `/api/new` endpoint.
//!
//! # Design
//! The service does not keep a strict schema on its replies: a successful
//! reply may carry `"error": false` next to `shorturl`, and failures may omit
//! `success` entirely. `ShortenResponse` therefore keeps every field optional
//! and drops values of the wrong JSON type instead of failing the whole
//! decode, so the presence checks in `ShortenClient::parse_shorten` decide
//! the outcome.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request payload for creating a short link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenRequest {
    pub longlink: String,
    /// Desired short id. Empty lets the service assign one.
    #[serde(default)]
    pub shortlink: String,
}

impl ShortenRequest {
    /// Request with an auto-assigned short id.
    pub fn auto(longlink: impl Into<String>) -> Self {
        Self {
            longlink: longlink.into(),
            shortlink: String::new(),
        }
    }
}

/// Decoded reply from the shortening service.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub shorturl: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

impl ShortenResponse {
    /// The short URL, if the reply reports success and carries a non-empty one.
    pub fn short_url(&self) -> Option<&str> {
        match (self.success, self.shorturl.as_deref()) {
            (Some(true), Some(url)) if !url.is_empty() => Some(url),
            _ => None,
        }
    }
}

/// Deserialize `T` if the value has the right shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Final state of a single shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    Shortened(String),
    Failed(String),
}
