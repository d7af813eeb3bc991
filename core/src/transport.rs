//! Blocking executors for `HttpRequest` values.
//!
//! # Design
//! `Transport` is the only place the core touches the network. The default
//! `UreqTransport` turns off ureq's status-code-as-error behavior so 4xx/5xx
//! replies come back as data and `ShortenClient::parse_shorten` can read the
//! service's error body. Anything that stops a reply from arriving (bad URL,
//! DNS, refused connection) becomes `ShortenError::Transport`. Once a status
//! line is in, the body is handed over as data even if it is not UTF-8 or
//! cannot be read in full.

use tracing::debug;

use crate::error::ShortenError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ShortenError>;
}

/// `Transport` backed by a blocking ureq agent with default timeouts.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ShortenError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ShortenError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // A reply has arrived: an unreadable body is the parser's problem.
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(status, error = %e, "could not read response body");
                String::new()
            }
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
