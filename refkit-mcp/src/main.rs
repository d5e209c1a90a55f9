//! refkit-mcp: MCP server exposing GitHub branch and commit operations.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use refkit_gh::consts::DEFAULT_TIMEOUT_SECS;
use refkit_gh::{GitHubClient, GitHubConfig};
use refkit_mcp::RefkitMcpServer;
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "MCP server for GitHub branch creation, updates, and commit listing")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,

  /// Override the GitHub API base URL (e.g. for GitHub Enterprise)
  #[arg(long = "api-url", value_name = "URL")]
  api_url: Option<String>,

  /// Per-request timeout in seconds
  #[arg(long = "timeout", value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // stdout carries the JSON-RPC stream; logs go to stderr.
  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  let mut config = GitHubConfig::from_env().with_timeout(Duration::from_secs(cli.timeout));
  if let Some(api_url) = cli.api_url {
    config = config.with_base_url(api_url);
  }
  info!(
    "Using GitHub API at {} ({})",
    config.base_url,
    if config.has_token() { "authenticated" } else { "anonymous" }
  );

  let client = GitHubClient::new(config).context("Failed to build GitHub client")?;
  let server = RefkitMcpServer::new(client);

  // Start MCP server on stdio
  let service = server.serve(rmcp::transport::io::stdio()).await?;
  service.waiting().await?;

  Ok(())
}
