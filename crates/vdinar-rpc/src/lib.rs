//! JSON-RPC client for the VDinar daemon (`vdinard`).
//!
//! Builds correctly-shaped requests for the daemon's RPC surface, adapts
//! the request encoding to the declared daemon version (named parameters
//! from 0.14.0, per-method minimum versions), sends them over HTTP(S),
//! and parses single or batched responses back into results or typed
//! errors. Batch responses are re-correlated to request order by id.
//!
//! ```no_run
//! use serde_json::json;
//! use vdinar_rpc::{BatchCall, Client, Config};
//!
//! # async fn run() -> Result<(), vdinar_rpc::Error> {
//! let client = Client::new(Config {
//!     username: Some("rpcuser".into()),
//!     password: Some("rpcpass".into()),
//!     version: Some("2.1.0".into()),
//!     ..Config::default()
//! })?;
//!
//! let height = client.get_block_count(Vec::new()).await?;
//! let results = client
//!     .call_batch(vec![
//!         BatchCall::new("getblockhash", vec![json!(0)]),
//!         BatchCall::new("getdifficulty", Vec::new()),
//!     ])
//!     .await?;
//! # let _ = (height, results);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod request;
mod response;
pub mod transport;
pub mod version;

mod methods;

pub use client::{Client, Config, Network, TlsOptions};
pub use error::{Error, RpcError, TransportError};
pub use request::BatchCall;
pub use transport::{HttpTransport, RawResponse, ResponseHeaders, Transport};
pub use version::Capabilities;
