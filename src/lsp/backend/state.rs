//! Backend state management
//!
//! This module defines the ZenithBackend struct, which holds the open
//! documents, the project graph cache and the framework metadata.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32};

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::lsp::models::LspDocument;
use crate::metadata::Metadata;
use crate::project::ProjectGraphCache;

/// The Zenith Language Server backend.
#[derive(Clone)]
pub struct ZenithBackend {
    pub(super) client: Client,
    pub(super) documents_by_uri: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    pub(super) graphs: Arc<ProjectGraphCache>,
    pub(super) metadata: Arc<Metadata>,
    /// Whether the client accepts `client/registerCapability` for watched files
    pub(super) watch_registration: Arc<AtomicBool>,
}

// Manual Debug implementation since Client doesn't expose useful state
impl std::fmt::Debug for ZenithBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenithBackend")
            .field("documents", &self.documents_by_uri.len())
            .field("graphs", &self.graphs.len())
            .finish_non_exhaustive()
    }
}
