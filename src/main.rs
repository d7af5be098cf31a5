use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use podscope::{AppContext, DirectoryClient, ReqwestClient, serve};

/// Serve normalized podcast directory lookups with derived analytics
#[derive(Parser, Debug)]
#[command(name = "podscope")]
#[command(about = "Podcast directory proxy with derived analytics")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "PODSCOPE_BIND")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "PODSCOPE_PORT")]
    port: u16,

    /// Base URL of the upstream directory service
    #[arg(
        long,
        default_value = "https://itunes.apple.com",
        env = "PODSCOPE_UPSTREAM"
    )]
    upstream_base: Url,

    /// Upstream request timeout in seconds
    #[arg(long, default_value = "10", env = "PODSCOPE_TIMEOUT_SECS")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("podscope=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let client = ReqwestClient::new(Duration::from_secs(args.timeout_secs))
        .context("Failed to build HTTP client")?;

    let directory = DirectoryClient::with_base_url(Arc::new(client), args.upstream_base.clone());
    let ctx = AppContext {
        directory: Arc::new(directory),
    };

    let addr = SocketAddr::from((args.bind, args.port));
    info!(upstream = %args.upstream_base, "starting podscope on {addr}");

    serve(ctx, addr).await.context("Server failed")?;

    Ok(())
}
