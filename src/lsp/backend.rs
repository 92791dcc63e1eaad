use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, info};

use crate::error::{Result, ZenithError};
use crate::lsp::models::LspDocument;
use crate::metadata::Metadata;
use crate::project::{ProjectGraph, ProjectGraphCache};
use crate::validators::validate;

// Import types from backend submodules
mod state;
mod utils;
mod handlers;

pub use state::ZenithBackend;
pub use utils::{DIAGNOSTIC_SOURCE, diagnostic_severity, finding_to_diagnostic};

/// Converts a `file://` URI to a filesystem path.
pub fn uri_to_path(uri: &Url) -> Result<PathBuf> {
    uri.to_file_path().map_err(|_| ZenithError::InvalidUri(uri.to_string()))
}

impl ZenithBackend {
    pub fn new(client: Client, metadata: Arc<Metadata>) -> Self {
        Self {
            client,
            documents_by_uri: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            graphs: Arc::new(ProjectGraphCache::new()),
            metadata,
            watch_registration: Arc::new(AtomicBool::new(false)),
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    fn document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// Project graph for the project containing `uri`. Non-file URIs and
    /// files outside any project have no graph.
    fn graph_for_uri(&self, uri: &Url) -> Option<Arc<ProjectGraph>> {
        match uri_to_path(uri) {
            Ok(path) => self.graphs.graph_for_file(&path),
            Err(e) => {
                debug!("No project graph: {}", e);
                None
            }
        }
    }

    /// Runs every check over the current document text.
    async fn diagnostics(&self, uri: &Url, document: &LspDocument) -> (Vec<Diagnostic>, i32) {
        let graph = self.graph_for_uri(uri);
        let state = document.state.read().await;
        let text = state.text.to_string();
        let diagnostics = validate(&text, graph.as_deref(), &self.metadata)
            .iter()
            .map(|finding| utils::finding_to_diagnostic(finding, &state))
            .collect();
        (diagnostics, state.version)
    }

    /// Validates the document and publishes the diagnostics, unless the
    /// document changed in the meantime.
    async fn validate_and_publish(&self, uri: Url, document: Arc<LspDocument>) {
        let (diagnostics, version) = self.diagnostics(&uri, &document).await;
        if document.version().await != version {
            debug!("Skipping stale diagnostics for {} (version {})", uri, version);
            return;
        }
        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, Some(version)).await;
    }

    /// Drops the graphs of the projects containing `paths` and re-validates
    /// the open documents under those projects.
    async fn invalidate_and_revalidate(&self, paths: &[PathBuf]) {
        let mut roots: Vec<PathBuf> = paths.iter().flat_map(|path| self.graphs.roots_containing(path)).collect();
        roots.sort();
        roots.dedup();

        let dropped = self.graphs.invalidate_paths(paths.iter().map(PathBuf::as_path));
        if dropped == 0 {
            return;
        }
        info!("Invalidated {} project graph(s) after file changes", dropped);

        let affected: Vec<(Url, Arc<LspDocument>)> = self
            .documents_by_uri
            .iter()
            .filter(|entry| under_any(entry.key(), &roots))
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        for (uri, document) in affected {
            self.validate_and_publish(uri, document).await;
        }
    }
}

fn under_any(uri: &Url, roots: &[PathBuf]) -> bool {
    match uri_to_path(uri) {
        Ok(path) => roots.iter().any(|root| path.starts_with(root)),
        Err(e) => {
            debug!("{}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_to_path() {
        let uri = Url::parse("file:///tmp/app/pages/index.zen").unwrap();
        assert_eq!(uri_to_path(&uri).unwrap(), PathBuf::from("/tmp/app/pages/index.zen"));

        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert!(matches!(uri_to_path(&untitled), Err(ZenithError::InvalidUri(_))));
    }

    #[test]
    fn test_under_any() {
        let uri = Url::parse("file:///work/site/src/pages/index.zen").unwrap();
        assert!(under_any(&uri, &[PathBuf::from("/work/site")]));
        assert!(!under_any(&uri, &[PathBuf::from("/work/other")]));
    }
}
