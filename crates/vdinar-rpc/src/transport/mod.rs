//! Pluggable HTTP POST transport.
//!
//! The client core never touches sockets; it hands a serialized body to
//! a [`Transport`] and gets back the raw status, headers, and body text.
//! [`HttpTransport`] is the reqwest-backed production implementation; a
//! canned-response mock lives in `mock` for tests.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TransportError;

/// Response headers keyed by lower-cased header name.
pub type ResponseHeaders = HashMap<String, String>;

/// A raw HTTP response, unparsed. `reason` carries the canonical status
/// reason phrase so the parser can surface non-JSON failure bodies
/// (e.g. an empty `401`) without knowing HTTP.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: ResponseHeaders,
    pub body: String,
}

impl RawResponse {
    /// Convenience constructor for canned responses.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_owned(),
            headers: ResponseHeaders::new(),
            body: body.into(),
        }
    }
}

/// A single-endpoint POST transport.
///
/// Implementations own authentication, TLS, and the timeout; failures
/// below the JSON-RPC layer surface as [`TransportError`] and are passed
/// through to callers unmodified.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: String) -> Result<RawResponse, TransportError>;
}
