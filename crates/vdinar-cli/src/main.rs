mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use serde_json::Value;

use vdinar_rpc::{Client, Config, TlsOptions};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let tls = if args.ssl || args.ssl_no_verify {
        TlsOptions {
            enabled: true,
            strict: !args.ssl_no_verify,
            ca_file: args.ca.clone(),
        }
    } else {
        TlsOptions::default()
    };

    let config = Config {
        network: args.network,
        host: args.host.clone(),
        port: args.port,
        username: args.rpc_user.clone(),
        password: args.rpc_pass.clone(),
        tls,
        timeout: Duration::from_millis(args.timeout_ms),
        version: args.daemon_version.clone(),
    };
    let endpoint = config.base_url();
    let client = Client::new(config).wrap_err("construct RPC client")?;

    let params: Vec<Value> = args.params.iter().map(|raw| parse_param(raw)).collect();
    tracing::debug!(endpoint = %endpoint, method = %args.method, "issuing rpc call");

    let value = if args.show_headers {
        let (value, headers) = client
            .call_with_headers(&args.method, params)
            .await
            .wrap_err_with(|| call_context(&args.method, &endpoint))?;
        let mut names: Vec<_> = headers.keys().collect();
        names.sort();
        for name in names {
            eprintln!("{name}: {}", headers[name]);
        }
        value
    } else {
        client
            .call(&args.method, params)
            .await
            .wrap_err_with(|| call_context(&args.method, &endpoint))?
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Parse one CLI parameter as JSON so numbers, booleans, arrays, and
/// objects come through typed; anything that is not valid JSON is taken
/// as a bare string.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn call_context(method: &str, endpoint: &str) -> String {
    format!("call {method} against {endpoint}")
}

#[cfg(test)]
mod tests {
    use super::parse_param;
    use serde_json::json;

    #[test]
    fn params_parse_as_json_with_string_fallback() {
        assert_eq!(parse_param("170"), json!(170));
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param(r#"{"minconf":6}"#), json!({ "minconf": 6 }));
        assert_eq!(parse_param("deadbeef"), json!("deadbeef"));
        assert_eq!(parse_param("\"quoted\""), json!("quoted"));
    }
}
