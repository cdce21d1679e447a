use std::path::PathBuf;

use clap::Parser;

use vdinar_rpc::Network;

/// Command-line JSON-RPC console for a VDinar daemon.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// RPC method name (case-insensitive).
    pub method: String,

    /// Positional parameters; each is parsed as JSON, bare words fall
    /// back to strings (`vdinar getblockhash 170`).
    pub params: Vec<String>,

    /// Network the daemon runs on; selects the default RPC port.
    #[arg(long, default_value = "mainnet", env = "VDINAR_NETWORK")]
    pub network: Network,

    /// Daemon host.
    #[arg(long, default_value = "localhost", env = "VDINAR_RPC_HOST")]
    pub host: String,

    /// Port override (defaults to the network's well-known port).
    #[arg(long, env = "VDINAR_RPC_PORT")]
    pub port: Option<u16>,

    /// RPC username.
    #[arg(long, env = "VDINAR_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "VDINAR_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Connect over HTTPS.
    #[arg(long)]
    pub ssl: bool,

    /// Accept self-signed daemon certificates (implies --ssl).
    #[arg(long)]
    pub ssl_no_verify: bool,

    /// Extra root CA certificate (PEM) to trust for the daemon.
    #[arg(long, env = "VDINAR_RPC_CA")]
    pub ca: Option<PathBuf>,

    /// Request timeout in milliseconds.
    #[arg(long, default_value = "30000")]
    pub timeout_ms: u64,

    /// Daemon version; gates unsupported methods client-side and enables
    /// named parameters from 0.14.0.
    #[arg(long, env = "VDINAR_DAEMON_VERSION")]
    pub daemon_version: Option<String>,

    /// Print the response headers to stderr before the result.
    #[arg(long)]
    pub show_headers: bool,
}
