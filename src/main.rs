use anyhow::Context;
use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use zenith_language_server::config::{Args, ServerConfig};
use zenith_language_server::logging::init_logger;
use zenith_language_server::lsp::backend::ZenithBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(Args::parse());
    let _guard = init_logger(config.no_color, config.log_level.as_deref(), config.file_logging)
        .context("failed to initialize logging")?;

    info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let metadata = config.load_metadata();
    let (service, socket) = LspService::new(move |client| ZenithBackend::new(client, metadata));

    Server::new(stdin, stdout, socket).serve(service).await;
    info!("Server stopped");
    Ok(())
}
