use std::io;

/// Errors produced by the client.
///
/// Construction-time validation failures (`InvalidNetwork`,
/// `InvalidVersion`) are fatal; per-call failures reject only the call
/// that raised them. Inside a batch, daemon-side failures are carried as
/// that member's [`RpcError`] element instead and never reject siblings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid network name {0:?}")]
    InvalidNetwork(String),

    #[error("invalid version {0:?}")]
    InvalidVersion(String),

    #[error("method {method:?} is not supported by version {version:?}")]
    UnsupportedMethod { method: String, version: String },

    #[error("feature {feature:?} of method {method:?} is not supported by version {version:?}")]
    UnsupportedFeature {
        method: String,
        feature: String,
        version: String,
    },

    /// The daemon answered with a JSON-RPC error envelope, or the
    /// envelope violated the result/error contract.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A transport-level failure, passed through unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be interpreted as JSON-RPC at all.
    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}

/// A JSON-RPC error returned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Failures raised below the JSON-RPC layer. The client does not retry
/// these and does not reclassify their codes.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TransportError {
    /// Whether the failure was the transport-enforced timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_method_names_method_and_version() {
        let err = Error::UnsupportedMethod {
            method: "getnetworkinfo".to_owned(),
            version: "2.0.0".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("getnetworkinfo"));
        assert!(message.contains("2.0.0"));
    }

    #[test]
    fn rpc_error_displays_code_and_message() {
        let err = RpcError {
            code: -5,
            message: "No such mempool or blockchain transaction".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "No such mempool or blockchain transaction (code -5)"
        );
    }
}
