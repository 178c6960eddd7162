//! LSP server: per-line attribution code actions and the open-permalink
//! command.
//!
//! Two triggers drive the engine. The code-action request is opportunistic:
//! every failure collapses to "no actions offered". The follow-up command is
//! explicit user intent, so its failures surface as editor warnings with a
//! fixed set of reasons.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::error::ActionError;
use crate::format;
use crate::git::blame;
use crate::git::cache::{AttributionCache, Cached};
use crate::git::identity::{self, FileIdentity};
use crate::git::invoker;
use crate::models::{AttributionRecord, PermalinkRequest};
use crate::permalink;

pub const OPEN_PERMALINK_COMMAND: &str = "blamelink.openPermalink";

pub struct BlameLinkServer {
    client: Client,
    /// The one piece of process-wide mutable state. Constructed at startup,
    /// reset on every save notification, never persisted.
    cache: Arc<Mutex<AttributionCache>>,
}

impl BlameLinkServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(AttributionCache::new())),
        }
    }

    /// Cache-aware attribution lookup for one one-based line.
    ///
    /// `None` means "nothing to show": the line has no attribution or the
    /// external query failed. Both outcomes are cached (the latter as
    /// `NoAttribution`) so repeated triggers do not re-run the query.
    async fn lookup_attribution(
        &self,
        identity: &FileIdentity,
        path: &Path,
        line: u32,
    ) -> Option<AttributionRecord> {
        let key = identity.cache_key(path, line);

        {
            let mut cache = self.cache.lock().await;
            if let Some(cached) = cache.get(&key) {
                tracing::debug!(line, "attribution cache hit");
                return match cached {
                    Cached::Attribution(record) => Some(record),
                    Cached::NoAttribution => None,
                };
            }
        }

        let record = match invoker::blame_line(&identity.root, &identity.rel_path, line).await {
            Some(raw) => blame::parse_porcelain(&raw),
            None => None,
        };

        let mut cache = self.cache.lock().await;
        match &record {
            Some(rec) => cache.set(key, Cached::Attribution(rec.clone())),
            None => cache.set(key, Cached::NoAttribution),
        }
        record
    }

    /// Resolve the follow-up request into an openable permalink URL.
    async fn resolve_permalink(&self, request: &PermalinkRequest) -> crate::error::Result<Url> {
        let path = request
            .uri
            .to_file_path()
            .map_err(|()| ActionError::NotInRepository)?;
        let identity = identity::derive(&path)
            .await
            .ok_or(ActionError::NotInRepository)?;

        // The remote lookup and the (cache-reusing) blame lookup are
        // independent; issue them concurrently and join.
        let (remote, record) = tokio::join!(
            invoker::remote_url(&identity.root),
            self.lookup_attribution(&identity, &path, request.line),
        );

        let raw_remote = remote.ok_or(ActionError::NoRemote)?;
        let record = record.ok_or(ActionError::NoAttribution)?;
        let base = permalink::normalize_remote(&raw_remote)
            .ok_or_else(|| ActionError::UnsupportedRemote(raw_remote.clone()))?;

        let link = permalink::build_permalink(&base, &identity.rel_path, &record.commit_id, request.line);
        Url::parse(&link).map_err(|_| ActionError::UnsupportedRemote(raw_remote))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for BlameLinkServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("Initializing blamelink");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Save notifications drive cache invalidation.
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![OPEN_PERMALINK_COMMAND.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "blamelink".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("blamelink initialized");
        self.client
            .log_message(MessageType::INFO, "blamelink ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down blamelink");
        Ok(())
    }

    /// On-disk content changed; the volatility token may not reflect it yet,
    /// so drop everything.
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        tracing::debug!("Document saved: {}", params.text_document.uri);
        self.cache.lock().await.clear();
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        // Cursor lines are zero-based; blame lines are one-based.
        let line = params.range.start.line + 1;

        let Some(identity) = identity::derive(&path).await else {
            return Ok(None);
        };
        let Some(record) = self.lookup_attribution(&identity, &path, line).await else {
            return Ok(None);
        };

        let title = format::format_label(&record, Utc::now().timestamp());
        let request = PermalinkRequest { uri, line };
        let arguments = serde_json::to_value(&request).ok().map(|v| vec![v]);

        Ok(Some(vec![CodeActionOrCommand::Command(Command {
            title,
            command: OPEN_PERMALINK_COMMAND.to_string(),
            arguments,
        })]))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != OPEN_PERMALINK_COMMAND {
            tracing::warn!("Unknown command: {}", params.command);
            return Ok(None);
        }

        let request = params
            .arguments
            .first()
            .cloned()
            .and_then(|v| serde_json::from_value::<PermalinkRequest>(v).ok());
        let Some(request) = request else {
            tracing::warn!("openPermalink invoked with malformed arguments");
            return Ok(None);
        };

        match self.resolve_permalink(&request).await {
            Ok(link) => {
                let shown = self
                    .client
                    .show_document(ShowDocumentParams {
                        uri: link,
                        external: Some(true),
                        take_focus: None,
                        selection: None,
                    })
                    .await;
                if let Err(e) = shown {
                    tracing::warn!("client could not open permalink: {e}");
                }
            }
            Err(reason) => {
                self.client
                    .show_message(MessageType::WARNING, reason.to_string())
                    .await;
            }
        }

        Ok(None)
    }
}
