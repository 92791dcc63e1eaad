//! LanguageServer trait implementation for ZenithBackend

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams, DidChangeWatchedFilesRegistrationOptions, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, FileSystemWatcher, GlobPattern, Hover, HoverContents, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MarkupContent, MarkupKind,
    Registration, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp::{LanguageServer, jsonrpc};
use tracing::{debug, error, info, warn};

use crate::lsp::features::completion::complete;
use crate::lsp::features::hover::hover;
use crate::lsp::models::LspDocument;

use super::state::ZenithBackend;
use super::uri_to_path;

const COMPONENT_GLOB: &str = "**/*.zen";
const WATCHER_REGISTRATION_ID: &str = "zenith-component-watcher";

fn trigger_characters() -> Vec<String> {
    ["<", "@", ":", "{", " "].iter().map(|c| c.to_string()).collect()
}

#[tower_lsp::async_trait]
impl LanguageServer for ZenithBackend {
    /// Handles the LSP initialize request and advertises server capabilities.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!(
            "Received initialize from {:?} (pid {:?})",
            params.client_info.as_ref().map(|c| c.name.as_str()),
            params.process_id
        );

        let dynamic_watch = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|w| w.did_change_watched_files.as_ref())
            .and_then(|w| w.dynamic_registration)
            .unwrap_or(false);
        self.watch_registration.store(dynamic_watch, Ordering::SeqCst);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(trigger_characters()),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Registers the component file watcher when the client allows it.
    async fn initialized(&self, _params: InitializedParams) {
        info!("Initialized");
        if !self.watch_registration.load(Ordering::SeqCst) {
            debug!("Client does not support dynamic watched-file registration");
            return;
        }

        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String(COMPONENT_GLOB.to_string()),
                kind: None,
            }],
        };
        let register_options = match serde_json::to_value(options) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to encode watcher registration: {}", e);
                return;
            }
        };
        let registration = Registration {
            id: WATCHER_REGISTRATION_ID.to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };
        if let Err(e) = self.client.register_capability(vec![registration]).await {
            warn!("Failed to register {} watcher: {}", COMPONENT_GLOB, e);
        }
    }

    async fn shutdown(&self) -> LspResult<()> {
        info!("Received shutdown request");
        self.graphs.clear();
        Ok(())
    }

    /// Handles opening a text document and publishes its diagnostics.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        info!("Opening document: URI={}, version={}", uri, version);

        let document = Arc::new(LspDocument::new(
            self.next_document_id(),
            uri.clone(),
            &params.text_document.text,
            version,
        ));
        self.documents_by_uri.insert(uri.clone(), Arc::clone(&document));
        self.validate_and_publish(uri, document).await;
    }

    /// Handles document changes and re-validates.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(document) = self.document(&uri) else {
            warn!("Failed to find document with URI={}", uri);
            return;
        };
        if document.apply(params.content_changes, version).await.is_none() {
            warn!("Ignoring stale change for URI={} (version {})", uri, version);
            return;
        }
        self.validate_and_publish(uri, document).await;
    }

    /// Handles closing a text document, removing it from state and clearing diagnostics.
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        match self.documents_by_uri.remove(&uri) {
            Some((_, document)) => info!("Closed document: {}, id: {}", uri, document.id),
            None => warn!("Failed to find document with URI={}", uri),
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    /// Invalidates the project graphs affected by component file changes.
    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        debug!("workspace/didChangeWatchedFiles: {} change(s)", params.changes.len());
        let paths: Vec<PathBuf> = params
            .changes
            .iter()
            .filter_map(|change| match uri_to_path(&change.uri) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Ignoring watched-file event: {}", e);
                    None
                }
            })
            .collect();
        self.invalidate_and_revalidate(&paths).await;
    }

    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(document) = self.document(&uri) else {
            warn!("Completion requested for unknown document {}", uri);
            return Ok(None);
        };

        let graph = self.graph_for_uri(&uri);
        let state = document.state.read().await;
        let offset = state.offset_at(&position);
        let text = state.text.to_string();
        drop(state);

        let items: Vec<_> = complete(&text, offset, graph.as_deref(), &self.metadata)
            .iter()
            .map(|suggestion| suggestion.to_completion_item())
            .collect();
        debug!("Completion at {}:{:?} -> {} item(s)", uri, position, items.len());
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(document) = self.document(&uri) else {
            warn!("Hover requested for unknown document {}", uri);
            return Ok(None);
        };

        let graph = self.graph_for_uri(&uri);
        let state = document.state.read().await;
        let offset = state.offset_at(&position);
        let text = state.text.to_string();

        Ok(hover(&text, offset, graph.as_deref(), &self.metadata).map(|info| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: info.contents,
            }),
            range: Some(state.range_of(&info.span)),
        }))
    }
}
