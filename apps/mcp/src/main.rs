use clap::Parser;
use tracing_subscriber::EnvFilter;
use yt_transcript_core::YoutubeTranscriptClient;

mod protocol;
mod server;
mod tools;

use server::McpServer;

#[derive(Debug, Parser)]
#[command(name = "yt-transcript-mcp", version)]
#[command(about = "Serve the get_transcript tool to MCP clients over stdio")]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    // stdout carries protocol frames; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = YoutubeTranscriptClient::new()?;
    let server = McpServer::new(client);

    tracing::info!("serving get_transcript over stdio");
    server.run().await
}
