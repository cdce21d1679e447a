//! Client facade: configuration, version gating, and the generic call
//! entry points.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, enabled, trace, Level};

use crate::catalog;
use crate::error::{Error, RpcError};
use crate::request::{self, BatchCall, RequestEnvelope};
use crate::response;
use crate::transport::{HttpTransport, ResponseHeaders, Transport};
use crate::version::Capabilities;

/// Networks the daemon can run on, with their well-known RPC ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn default_port(self) -> u16 {
        match self {
            Network::Mainnet => 9333,
            Network::Testnet => 19333,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(Error::InvalidNetwork(other.to_owned())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TLS settings for the daemon connection. `strict` controls certificate
/// verification; a custom root CA may be supplied for self-signed
/// daemon certificates without giving up verification.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    pub enabled: bool,
    pub strict: bool,
    pub ca_file: Option<PathBuf>,
}

impl TlsOptions {
    /// TLS on with certificate verification, the default once TLS is
    /// enabled at all.
    pub fn strict() -> Self {
        Self {
            enabled: true,
            strict: true,
            ca_file: None,
        }
    }

    /// TLS on, accepting any certificate. For daemons with self-signed
    /// certificates where the CA cannot be supplied.
    pub fn lenient() -> Self {
        Self {
            enabled: true,
            strict: false,
            ca_file: None,
        }
    }
}

/// Connection configuration accepted at client construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub network: Network,
    pub host: String,
    /// Port override; `None` selects the network's well-known port.
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: TlsOptions,
    pub timeout: Duration,
    /// Declared daemon version. Gates method/feature support and named
    /// parameters; when absent, everything is assumed supported and
    /// parameters are always sent positionally.
    pub version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            host: "localhost".to_owned(),
            port: None,
            username: None,
            password: None,
            tls: TlsOptions::default(),
            timeout: Duration::from_millis(30_000),
            version: None,
        }
    }
}

impl Config {
    pub fn rpc_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.network.default_port())
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.tls.enabled { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.host, self.rpc_port())
    }

    /// Basic-auth credentials, attached when a username or password is
    /// configured. A lone password rides on an empty username rather
    /// than disabling auth.
    pub(crate) fn basic_auth(&self) -> Option<(String, Option<String>)> {
        if self.username.is_none() && self.password.is_none() {
            return None;
        }
        Some((
            self.username.clone().unwrap_or_default(),
            self.password.clone(),
        ))
    }
}

/// JSON-RPC client for a `vdinard` endpoint.
///
/// Capabilities are derived once at construction and never mutated; a
/// single instance is safe to share across tasks, and concurrent calls
/// carry no ordering guarantee between each other.
pub struct Client {
    capabilities: Capabilities,
    transport: Arc<dyn Transport>,
    next_id: AtomicU64,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("capabilities", &self.capabilities)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connect over HTTP(S) with the built-in transport.
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = Arc::new(HttpTransport::from_config(&config)?);
        Self::with_transport(&config, transport)
    }

    /// Build a client on top of a custom [`Transport`].
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        let capabilities = Capabilities::derive(catalog::METHODS, config.version.as_deref())?;
        Ok(Self {
            capabilities,
            transport,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Execute one RPC call. `method` is matched case-insensitively;
    /// parameters are positional unless the daemon accepts named
    /// parameters and exactly one mapping argument was supplied.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, Error> {
        let (value, _) = self.call_with_headers(method, params).await?;
        Ok(value)
    }

    /// [`Client::call`], additionally returning the transport response
    /// headers.
    pub async fn call_with_headers(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<(Value, ResponseHeaders), Error> {
        let canonical = method.to_ascii_lowercase();
        self.capabilities.ensure_method(&canonical)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = request::build_single(
            &canonical,
            params,
            self.capabilities.named_params_supported(),
            id,
        );
        debug!(rpc.id = envelope.id, rpc.method = %envelope.method, "rpc call");
        self.trace_request(std::slice::from_ref(&envelope));

        let body = serde_json::to_string(&envelope).expect("request envelopes always serialize");
        let response = self.transport.post(body).await?;
        debug!(
            rpc.id = envelope.id,
            rpc.method = %envelope.method,
            status = response.status,
            body_len = response.body.len(),
            "rpc response"
        );

        let value = response::parse_single(&response)?;
        self.trace_result(&envelope.method, &value);
        Ok((value, response.headers))
    }

    /// Execute a batch of calls in one round trip.
    ///
    /// The returned list is aligned to the input order no matter how the
    /// daemon ordered its response array. Daemon-side failures of
    /// individual members are carried as that member's `Err` element;
    /// the call as a whole only fails on transport or structural errors.
    pub async fn call_batch(
        &self,
        calls: Vec<BatchCall>,
    ) -> Result<Vec<Result<Value, RpcError>>, Error> {
        let (results, _) = self.call_batch_with_headers(calls).await?;
        Ok(results)
    }

    /// [`Client::call_batch`], additionally returning the transport
    /// response headers (once per batch, not per member).
    pub async fn call_batch_with_headers(
        &self,
        calls: Vec<BatchCall>,
    ) -> Result<(Vec<Result<Value, RpcError>>, ResponseHeaders), Error> {
        if calls.is_empty() {
            return Ok((Vec::new(), ResponseHeaders::new()));
        }
        for call in &calls {
            self.capabilities
                .ensure_method(&call.method.to_ascii_lowercase())?;
        }

        let envelopes = request::build_batch(calls);
        debug!(rpc.batch_size = envelopes.len(), "rpc batch call");
        self.trace_request(&envelopes);

        let body = serde_json::to_string(&envelopes).expect("request envelopes always serialize");
        let response = self.transport.post(body).await?;
        debug!(
            rpc.batch_size = envelopes.len(),
            status = response.status,
            body_len = response.body.len(),
            "rpc batch response"
        );

        let results = response::parse_batch(&response, envelopes.len())?;
        Ok((results, response.headers))
    }

    /// Trace-log request envelopes with credential parameters masked.
    /// The wire payload is never touched, only the logged copy.
    fn trace_request(&self, envelopes: &[RequestEnvelope]) {
        if !enabled!(Level::TRACE) {
            return;
        }
        for envelope in envelopes {
            let mut params = envelope.params.clone();
            if let Some(descriptor) = catalog::find(&envelope.method) {
                if let Some(mask) = descriptor.obfuscate_request {
                    mask(&mut params);
                }
            }
            trace!(
                rpc.id = envelope.id,
                rpc.method = %envelope.method,
                params = %params,
                "rpc request body"
            );
        }
    }

    fn trace_result(&self, method: &str, value: &Value) {
        if !enabled!(Level::TRACE) {
            return;
        }
        let mut shown = value.clone();
        if let Some(descriptor) = catalog::find(method) {
            if let Some(mask) = descriptor.obfuscate_response {
                mask(&mut shown);
            }
        }
        trace!(rpc.method = %method, result = %shown, "rpc result");
    }
}
