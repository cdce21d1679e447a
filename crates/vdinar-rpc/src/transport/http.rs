use async_trait::async_trait;
use reqwest::header;
use tracing::debug;

use crate::client::Config;
use crate::error::{Error, TransportError};

use super::{RawResponse, ResponseHeaders, Transport};

/// HTTP(S) transport over a shared `reqwest` client.
///
/// Built once from a [`Config`]; the base URL, credentials, and TLS
/// settings are fixed for the transport's lifetime.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    auth: Option<(String, Option<String>)>,
}

impl HttpTransport {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .tcp_nodelay(true);

        if config.tls.enabled {
            if !config.tls.strict {
                builder = builder.danger_accept_invalid_certs(true);
            }
            if let Some(ca_file) = &config.tls.ca_file {
                let pem = std::fs::read(ca_file).map_err(TransportError::Io)?;
                let certificate =
                    reqwest::Certificate::from_pem(&pem).map_err(TransportError::Http)?;
                builder = builder.add_root_certificate(certificate);
            }
        }

        let client = builder.build().map_err(TransportError::Http)?;

        Ok(Self {
            client,
            url: config.base_url(),
            auth: config.basic_auth(),
        })
    }

    /// The endpoint this transport posts to.
    pub fn endpoint(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some((user, pass)) = &self.auth {
            builder = builder.basic_auth(user, pass.as_ref());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers: ResponseHeaders = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;
        debug!(%status, body_len = body.len(), "rpc http response");

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            headers,
            body,
        })
    }
}
