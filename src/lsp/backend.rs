use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

use crate::changelog::ChangelogResolver;
use crate::config::{DEBOUNCE_INTERVAL_MS, LspConfig};
use crate::lsp::diagnostics::{generate_diagnostics, generate_inlay_hints};
use crate::lsp::hover::changelog_hover;
use crate::lsp::process::{ManifestReport, process_manifest};
use crate::lsp::scheduler::PassScheduler;
use crate::parser::types::{FileType, RegistryType};
use crate::parser::{HoverExtractor, ManifestParser};
use crate::version::registries::{NpmRegistry, PypiRegistry, RubyGemsRegistry};
use crate::version::registry::Registry;

/// An open manifest
struct Document {
    text: String,
    file_type: FileType,
    /// Only exact file names are annotated; others are tracked for hovers
    annotate: bool,
    parser: Arc<tokio::sync::Mutex<ManifestParser>>,
    report: ManifestReport,
}

/// State shared between request handlers and background passes
struct ServerState {
    documents: Mutex<HashMap<Url, Document>>,
    registries: HashMap<RegistryType, Arc<dyn Registry>>,
    config: RwLock<LspConfig>,
    scheduler: Arc<PassScheduler>,
    changelog: ChangelogResolver,
    hover: HoverExtractor,
    inlay_hint_refresh: AtomicBool,
}

pub struct Backend {
    client: Client,
    state: Arc<ServerState>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::build(
            client,
            Self::initialize_registries(),
            ChangelogResolver::default(),
        )
    }

    /// Build a Backend with custom registries and changelog resolver
    pub fn build(
        client: Client,
        registries: HashMap<RegistryType, Arc<dyn Registry>>,
        changelog: ChangelogResolver,
    ) -> Self {
        Self {
            client,
            state: Arc::new(ServerState {
                documents: Mutex::new(HashMap::new()),
                registries,
                config: RwLock::new(LspConfig::default()),
                scheduler: Arc::new(PassScheduler::new(Duration::from_millis(
                    DEBOUNCE_INTERVAL_MS,
                ))),
                changelog,
                hover: HoverExtractor::new(),
                inlay_hint_refresh: AtomicBool::new(false),
            }),
        }
    }

    fn initialize_registries() -> HashMap<RegistryType, Arc<dyn Registry>> {
        let mut registries: HashMap<RegistryType, Arc<dyn Registry>> = HashMap::new();
        registries.insert(RegistryType::Npm, Arc::new(NpmRegistry::default()));
        registries.insert(RegistryType::PyPI, Arc::new(PypiRegistry::default()));
        registries.insert(RegistryType::RubyGems, Arc::new(RubyGemsRegistry::default()));
        registries
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    ..Default::default()
                },
            )),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            inlay_hint_provider: Some(OneOf::Left(true)),
            ..Default::default()
        }
    }

    fn apply_config(&self, config: LspConfig) {
        self.state
            .changelog
            .set_cache_enabled(config.enable_changelog_cache);
        *self
            .state
            .config
            .write()
            .unwrap_or_else(|e| e.into_inner()) = config;
    }
}

impl ServerState {
    fn lock_documents(&self) -> MutexGuard<'_, HashMap<Url, Document>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_open(&self, uri: &Url) -> bool {
        self.lock_documents().contains_key(uri)
    }

    fn registry_enabled(&self, registry_type: RegistryType) -> bool {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .registries
            .is_enabled(registry_type)
    }

    /// Run the manifest pass for `uri`. `None` if the document is gone.
    async fn annotate(&self, uri: &Url) -> Option<ManifestReport> {
        let (text, file_type, parser) = {
            let documents = self.lock_documents();
            let document = documents.get(uri)?;
            (
                document.text.clone(),
                document.file_type,
                Arc::clone(&document.parser),
            )
        };

        let registry_type = file_type.registry_type();
        if !self.registry_enabled(registry_type) {
            debug!("{} registry disabled, clearing {}", registry_type.as_str(), uri);
            return Some(ManifestReport::default());
        }

        let Some(registry) = self.registries.get(&registry_type) else {
            warn!("No registry for {}", registry_type.as_str());
            return Some(ManifestReport::default());
        };

        let lines: Vec<&str> = text.lines().collect();
        let mut parser = parser.lock().await;
        Some(process_manifest(&mut parser, registry.as_ref(), &lines).await)
    }
}

/// Arm a debounced pass for `uri`
fn schedule_pass(state: &Arc<ServerState>, client: &Client, uri: &Url) {
    let pass = run_pass(Arc::clone(state), client.clone(), uri.clone());
    state.scheduler.trigger(uri, pass);
}

async fn run_pass(state: Arc<ServerState>, client: Client, uri: Url) {
    let Some(generation) = state.scheduler.try_begin(&uri) else {
        debug!("Pass already running for {}, trigger dropped", uri);
        return;
    };

    let report = state.annotate(&uri).await;
    state.scheduler.finish(&uri, generation);

    if !state.scheduler.is_current(&uri, generation) {
        debug!("Discarding stale pass for {}", uri);
        if state.is_open(&uri) {
            schedule_pass(&state, &client, &uri);
        }
        return;
    }

    let Some(report) = report else {
        return;
    };

    let diagnostics = generate_diagnostics(&report);
    info!(
        "{}: {} up to date, {} need update",
        uri,
        report.up_to_date.len(),
        report.needs_update.len()
    );

    if let Some(document) = state.lock_documents().get_mut(&uri) {
        document.report = report;
    }

    client
        .log_message(
            MessageType::LOG,
            format!("Publishing {} diagnostics for {}", diagnostics.len(), uri),
        )
        .await;
    client.publish_diagnostics(uri, diagnostics, None).await;
    refresh_inlay_hints(&state, &client).await;
}

async fn refresh_inlay_hints(state: &ServerState, client: &Client) {
    if !state.inlay_hint_refresh.load(Ordering::Relaxed) {
        return;
    }
    if let Err(e) = client.inlay_hint_refresh().await {
        warn!("Inlay hint refresh failed: {}", e);
    }
}

fn supports_inlay_hint_refresh(params: &InitializeParams) -> bool {
    params
        .capabilities
        .workspace
        .as_ref()
        .and_then(|workspace| workspace.inlay_hint.as_ref())
        .and_then(|inlay_hint| inlay_hint.refresh_support)
        .unwrap_or(false)
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.client
            .log_message(MessageType::INFO, "LSP server initializing")
            .await;

        self.state
            .inlay_hint_refresh
            .store(supports_inlay_hint_refresh(&params), Ordering::Relaxed);
        self.apply_config(LspConfig::from_settings(params.initialization_options));

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.client
            .log_message(MessageType::INFO, "LSP server shutting down")
            .await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(file_type) = FileType::from_uri_case_insensitive(uri.path()) else {
            debug!("Ignoring unsupported document {}", uri);
            return;
        };
        let annotate = FileType::from_uri(uri.path()).is_some();

        self.client
            .log_message(MessageType::LOG, format!("Document opened: {}", uri))
            .await;

        self.state.lock_documents().insert(
            uri.clone(),
            Document {
                text: params.text_document.text,
                file_type,
                annotate,
                parser: Arc::new(tokio::sync::Mutex::new(ManifestParser::new(file_type))),
                report: ManifestReport::default(),
            },
        );

        if annotate {
            schedule_pass(&self.state, &self.client, &uri);
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // With FULL sync mode, the last content change contains the full document text
        let Some(content) = params.content_changes.into_iter().last().map(|c| c.text) else {
            return;
        };
        let uri = params.text_document.uri;

        let annotate = {
            let mut documents = self.state.lock_documents();
            let Some(document) = documents.get_mut(&uri) else {
                return;
            };
            document.text = content;
            document.annotate
        };

        self.client
            .log_message(MessageType::LOG, format!("Document changed: {}", uri))
            .await;

        if annotate {
            schedule_pass(&self.state, &self.client, &uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(document) = self.state.lock_documents().remove(&uri) else {
            return;
        };
        self.state.scheduler.remove(&uri);

        self.client
            .log_message(MessageType::LOG, format!("Document closed: {}", uri))
            .await;

        if document.annotate {
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
            refresh_inlay_hints(&self.state, &self.client).await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let config = LspConfig::from_settings(Some(params.settings));
        info!("Configuration changed: {:?}", config);
        self.apply_config(config);

        let annotated: Vec<Url> = self
            .state
            .lock_documents()
            .iter()
            .filter(|(_, document)| document.annotate)
            .map(|(uri, _)| uri.clone())
            .collect();
        for uri in annotated {
            schedule_pass(&self.state, &self.client, &uri);
        }
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let documents = self.state.lock_documents();
        let Some(document) = documents.get(&params.text_document.uri) else {
            return Ok(None);
        };

        let range = params.range;
        let hints = generate_inlay_hints(&document.report)
            .into_iter()
            .filter(|hint| {
                hint.position.line >= range.start.line && hint.position.line <= range.end.line
            })
            .collect();

        Ok(Some(hints))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;

        let (file_type, line) = {
            let documents = self.state.lock_documents();
            let Some(document) = documents.get(&uri) else {
                return Ok(None);
            };
            let Some(line) = document.text.lines().nth(position.line as usize) else {
                return Ok(None);
            };
            (document.file_type, line.to_string())
        };

        Ok(changelog_hover(
            &self.state.hover,
            &self.state.changelog,
            file_type,
            uri.path(),
            &line,
        )
        .await)
    }
}
