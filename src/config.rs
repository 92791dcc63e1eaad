//! Command line and environment configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crate::metadata::Metadata;

/// Environment variable naming a metadata JSON file
pub const METADATA_ENV: &str = "ZENITH_LSP_METADATA";

#[derive(Debug, Clone, Parser)]
#[command(name = "zenith-language-server")]
#[command(version, about = "Language server for Zenith .zen components")]
pub struct Args {
    /// Log level for stderr output (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    pub no_color: bool,

    /// Do not write a session log under the user cache directory
    #[arg(long)]
    pub no_file_logging: bool,

    /// Framework metadata JSON replacing the built-in tables
    #[arg(long, env = METADATA_ENV)]
    pub metadata: Option<PathBuf>,

    /// Communicate over stdin/stdout (the only transport; accepted for client compatibility)
    #[arg(long)]
    pub stdio: bool,
}

/// Settings resolved from [`Args`]; logging is configured from these before
/// the metadata tables are loaded
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub log_level: Option<String>,
    pub no_color: bool,
    pub file_logging: bool,
    pub metadata_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_args(args: Args) -> Self {
        Self {
            log_level: args.log_level,
            no_color: args.no_color,
            file_logging: !args.no_file_logging,
            metadata_path: args.metadata,
        }
    }

    pub fn load_metadata(&self) -> Arc<Metadata> {
        let metadata = match self.metadata_path.as_deref() {
            Some(path) => load_metadata(path),
            None => Metadata::builtin(),
        };
        Arc::new(metadata)
    }
}

/// Loads metadata from `path`, falling back to the built-in tables
pub fn load_metadata(path: &Path) -> Metadata {
    match Metadata::from_file(path) {
        Ok(metadata) => {
            info!("Loaded framework metadata from {:?}", path);
            metadata
        }
        Err(e) => {
            warn!("{}; using built-in metadata", e);
            Metadata::builtin()
        }
    }
}
