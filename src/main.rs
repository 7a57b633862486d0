//! Salesforce package install agent binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use sf_install_agent::agent::InstallAgent;
use sf_install_agent::config::{AgentConfig, PRODUCTION_LOGIN_URL};
use sf_install_agent::server;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sf-install-agent")]
#[command(about = "Salesforce package install agent (OAuth2 JWT Bearer flow)")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "LISTEN_ADDR")]
    listen: SocketAddr,

    /// Path to the connected app's RSA private key (PEM)
    #[arg(long, env = "SF_PRIVATE_KEY_FILE")]
    private_key_file: Option<PathBuf>,

    /// Inline PEM private key
    #[arg(long, env = "SF_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Salesforce login URL (use https://test.salesforce.com for sandboxes)
    #[arg(long, default_value = PRODUCTION_LOGIN_URL, env = "SF_LOGIN_URL")]
    login_url: String,

    /// Tooling API version
    #[arg(long, default_value = "59.0", env = "SF_API_VERSION")]
    api_version: String,

    /// Outbound HTTP timeout in seconds
    #[arg(long, default_value_t = 30, env = "SF_HTTP_TIMEOUT_SECS")]
    http_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, env = "AGENT_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("{}={}", env!("CARGO_CRATE_NAME"), log_level))
        .json()
        .init();

    info!("Starting Salesforce package install agent");

    let config = AgentConfig {
        login_url: args.login_url,
        api_version: args.api_version,
        signing_key_path: args.private_key_file,
        signing_key_inline: args.private_key,
        http_timeout: Duration::from_secs(args.http_timeout_secs),
    };
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    info!(
        login_url = %config.login_url,
        api_version = %config.api_version,
        key_from_file = config.signing_key_path.is_some(),
        "Configuration loaded"
    );

    let agent = Arc::new(InstallAgent::new(config)?);
    let app = server::router(agent);

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    info!(addr = %args.listen, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
