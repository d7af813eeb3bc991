//! Synchronous client core for a Chhoto-URL style shortening service.
//!
//! # Overview
//! Forwards one long URL to `POST {base}/api/new` and captures either the
//! short URL or a user-facing error message.
//!
//! # Design
//! - `ShortenClient` is sans-IO: `build_shorten` produces an `HttpRequest`,
//!   `parse_shorten` consumes an `HttpResponse`.
//! - `Transport` executes the round-trip; `UreqTransport` is the blocking
//!   default.
//! - `ShortenerProxy` glues the two together, performing the call at
//!   construction and never returning an error.
//! - Base address and key arrive through `ShortenerConfig`, built by the host.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod transport;
pub mod types;

pub use client::ShortenClient;
pub use config::ShortenerConfig;
pub use error::{ConfigError, ShortenError, PROTOCOL_ERROR_MESSAGE, TRANSPORT_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use proxy::ShortenerProxy;
pub use transport::{Transport, UreqTransport};
pub use types::{ShortenOutcome, ShortenRequest, ShortenResponse};
