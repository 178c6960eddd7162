//! blamelink - git blame attribution and permalinks as editor code actions.
//!
//! Speaks LSP over stdio. For the line under the cursor the server offers a
//! single code action titled with the line's blame attribution; executing it
//! opens a commit-pinned permalink on the hosting forge.

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blamelink::server::BlameLinkServer;

/// Git blame attribution and permalinks as editor code actions.
#[derive(Parser)]
#[command(name = "blamelink", version, about, long_about = None)]
struct Cli {
    /// Tracing filter, e.g. "blamelink=debug" (takes precedence over RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the protocol.
    let filter = match cli.log {
        Some(directives) => tracing_subscriber::EnvFilter::new(directives),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "blamelink=info".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting blamelink language server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(BlameLinkServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
