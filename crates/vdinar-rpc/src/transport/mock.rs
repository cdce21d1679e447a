use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;

use super::{RawResponse, ResponseHeaders, Transport};

/// Canned-response transport for facade tests.
///
/// Queued responses are replayed in order; every posted body is recorded
/// so tests can assert the exact wire shape. Posting with an empty queue
/// panics, which doubles as a "transport must not be invoked" assertion.
pub(crate) struct MockTransport {
    responses: Mutex<Vec<RawResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(self, body: &str) -> Self {
        self.reply_with(RawResponse::ok(body))
    }

    pub(crate) fn reply_status(self, status: u16, reason: &str, body: &str) -> Self {
        self.reply_with(RawResponse {
            status,
            reason: reason.to_owned(),
            headers: ResponseHeaders::new(),
            body: body.to_owned(),
        })
    }

    pub(crate) fn reply_with_headers(self, body: &str, headers: &[(&str, &str)]) -> Self {
        self.reply_with(RawResponse {
            status: 200,
            reason: "OK".to_owned(),
            headers: headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            body: body.to_owned(),
        })
    }

    pub(crate) fn reply_with(self, response: RawResponse) -> Self {
        self.responses
            .lock()
            .expect("mock response queue must not be poisoned")
            .push(response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("mock request log must not be poisoned")
            .clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, body: String) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .expect("mock request log must not be poisoned")
            .push(body);
        let mut responses = self
            .responses
            .lock()
            .expect("mock response queue must not be poisoned");
        assert!(
            !responses.is_empty(),
            "MockTransport received a request with no queued response"
        );
        Ok(responses.remove(0))
    }
}
