//! MCP stdio server exposing the FOFA asset-search tool and the
//! security-analysis prompt.

use std::sync::Arc;

use asset_search_tools::AssetSearchTools;
use clap::Parser;
use fofa_async::FofaConfig;
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

mod server;

use server::AssetSearchServer;

#[derive(Parser, Debug)]
#[command(name = "fofa-mcp")]
#[command(about = "MCP stdio server for FOFA asset search", version)]
struct Args {
    /// List served tools and exit
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr: stdout carries the MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fofa_mcp=info,asset_search_tools=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Install the rustls CryptoProvider before any HTTP clients are created;
    // rustls 0.23+ panics if it cannot auto-select a single provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    if args.list_tools {
        eprintln!("Available tools (1):");
        eprintln!("  - {}", server::TOOL_SEARCH_ASSETS);
        return Ok(());
    }

    let config = FofaConfig::new();
    tracing::info!(api_base = config.api_base(), "starting fofa-mcp");

    let tools = Arc::new(AssetSearchTools::with_config(config));
    let server = AssetSearchServer::new(tools).with_info("fofa-mcp", env!("CARGO_PKG_VERSION"));

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
