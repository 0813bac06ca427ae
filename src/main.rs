//! MtGox API CLI
//!
//! Thin harness over the client library: resolves credentials from flags,
//! the environment or an `.apirc` file, performs a single API call and
//! prints the result.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mtgox_client::{ApiClient, CallData, CallOutcome, CallRequest, Credentials};

/// MtGox API CLI
#[derive(Parser)]
#[command(name = "mtgox")]
#[command(about = "Signed calls against the MtGox versioned HTTP API")]
#[command(version)]
struct Cli {
    /// API path to call, including the version digit
    #[arg(default_value = "2/BTCUSD/money/ticker")]
    path: String,

    /// Request argument as key=value (repeatable)
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    args: Vec<(String, String)>,

    /// API key
    #[arg(long, env = "MTGOX_API_KEY")]
    key: Option<String>,

    /// Base64-encoded API secret
    #[arg(long, env = "MTGOX_API_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// JSON credentials file with "Key" and "Secret" fields
    #[arg(long, default_value = ".apirc")]
    credentials: PathBuf,

    /// Skip request signing and use the market-data host
    #[arg(long)]
    public: bool,

    /// Use plain http instead of https
    #[arg(long)]
    plain: bool,

    /// Print the response body without JSON decoding
    #[arg(long)]
    raw: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("mtgox_client=info".parse()?))
        .init();

    let cli = Cli::parse();

    // flags win over the credentials file; no credentials means public-only
    let credentials = match (cli.key, cli.secret) {
        (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
        _ => Credentials::from_file(&cli.credentials).ok(),
    };
    if credentials.is_some() {
        info!("credentials loaded, authenticated calls enabled");
    }

    let api = ApiClient::new(credentials)?;
    let api = if cli.public { api.public() } else { api };

    let mut request = CallRequest::new(&cli.path);
    for (key, value) in cli.args {
        request = request.arg(key, value);
    }
    if cli.plain {
        request = request.insecure();
    }
    if cli.raw {
        request = request.raw_response();
    }

    match api.call(request).await? {
        CallOutcome::Success {
            data: CallData::Json(value),
        } => println!("{}", serde_json::to_string_pretty(&value)?),
        CallOutcome::Success {
            data: CallData::Raw(body),
        } => println!("{}", body),
        CallOutcome::Failure { code, reason } => {
            bail!("API call failed with HTTP {}: {}", code, reason)
        }
    }

    Ok(())
}
