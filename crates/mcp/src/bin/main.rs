//! Binary entry point for the pinata-mcp server.

use clap::Parser;
use pinata_api::{Config, PinataClient, config};
use pinata_guard::{AllowedRoots, Anchor, Containment, PathGuard};
use pinata_mcp::{Error, PinataServer};
use rmcp::ServiceExt;
use std::path::PathBuf;

/// Pinata MCP server: Pinata IPFS tools with sandboxed local file access.
#[derive(Parser)]
#[command(name = "pinata-mcp", version, about)]
struct Cli {
    /// Allowed directories the server may read from and write to.
    #[arg(value_name = "DIR")]
    allowed_dirs: Vec<PathBuf>,

    /// How paths are matched against allowed directories: "component" or
    /// "string-prefix" (legacy; `/data/foo` also admits `/data/foobar`).
    #[arg(long, default_value_t = Containment::Component)]
    containment: Containment,

    /// Pinata API JWT.
    #[arg(long, env = "PINATA_JWT", hide_env_values = true)]
    jwt: Option<String>,

    /// Dedicated gateway host used for content links.
    #[arg(long, env = "GATEWAY_URL")]
    gateway: Option<String>,

    #[arg(long, env = "PINATA_API_URL", default_value = config::API_URL, hide = true)]
    api_url: String,

    #[arg(long, env = "PINATA_UPLOADS_URL", default_value = config::UPLOADS_URL, hide = true)]
    uploads_url: String,
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if matches!(e, Error::Guard(pinata_guard::GuardError::NoRoots)) {
            eprintln!("Usage: pinata-mcp <DIR>...");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let anchor = Anchor::from_process()?;
    let roots = AllowedRoots::establish(&cli.allowed_dirs, &anchor).await?;
    let guard = PathGuard::new(roots, anchor).with_containment(cli.containment);

    let client = PinataClient::new(Config {
        jwt: cli.jwt,
        gateway: cli.gateway,
        api_url: cli.api_url,
        uploads_url: cli.uploads_url,
    })?;
    if client.config().jwt.is_none() {
        tracing::warn!("PINATA_JWT is not set; API tools will fail until it is provided");
    }

    tracing::info!(containment = %cli.containment, "pinata-mcp serving on stdio");
    let server = PinataServer::new(guard, client);
    let transport = rmcp::transport::stdio();
    server
        .serve(transport)
        .await
        .map_err(Box::new)?
        .waiting()
        .await?;
    Ok(())
}
