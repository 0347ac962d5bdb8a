//! LSP request/notification test utilities

use std::time::Duration;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tower_lsp::ClientSocket;
use tower_lsp::jsonrpc::{Request, Response};
use tower_lsp::lsp_types::*;

/// Create an LSP initialize request
pub fn create_initialize_request(id: i64) -> Request {
    Request::build("initialize")
        .id(id)
        .params(serde_json::to_value(InitializeParams::default()).unwrap())
        .finish()
}

/// Create an LSP initialize request carrying `initializationOptions`
#[allow(dead_code)]
pub fn create_initialize_request_with_options(id: i64, options: serde_json::Value) -> Request {
    Request::build("initialize")
        .id(id)
        .params(
            serde_json::to_value(InitializeParams {
                initialization_options: Some(options),
                ..Default::default()
            })
            .unwrap(),
        )
        .finish()
}

/// Create an LSP initialized notification
pub fn create_initialized_notification() -> Request {
    Request::build("initialized")
        .params(serde_json::to_value(InitializedParams {}).unwrap())
        .finish()
}

/// Create an LSP didOpen notification
pub fn create_did_open_notification(uri: &str, content: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(
            serde_json::to_value(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: uri.parse().unwrap(),
                    language_id: "plaintext".to_string(),
                    version: 1,
                    text: content.to_string(),
                },
            })
            .unwrap(),
        )
        .finish()
}

/// Create an LSP didChange notification
#[allow(dead_code)]
pub fn create_did_change_notification(uri: &str, content: &str, version: i32) -> Request {
    Request::build("textDocument/didChange")
        .params(
            serde_json::to_value(DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier {
                    uri: uri.parse().unwrap(),
                    version,
                },
                content_changes: vec![TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text: content.to_string(),
                }],
            })
            .unwrap(),
        )
        .finish()
}

/// Create an LSP didClose notification
#[allow(dead_code)]
pub fn create_did_close_notification(uri: &str) -> Request {
    Request::build("textDocument/didClose")
        .params(
            serde_json::to_value(DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier {
                    uri: uri.parse().unwrap(),
                },
            })
            .unwrap(),
        )
        .finish()
}

/// Create a workspace/didChangeConfiguration notification
#[allow(dead_code)]
pub fn create_did_change_configuration_notification(settings: serde_json::Value) -> Request {
    Request::build("workspace/didChangeConfiguration")
        .params(serde_json::to_value(DidChangeConfigurationParams { settings }).unwrap())
        .finish()
}

/// Create a textDocument/inlayHint request covering `end_line` lines
#[allow(dead_code)]
pub fn create_inlay_hint_request(id: i64, uri: &str, end_line: u32) -> Request {
    Request::build("textDocument/inlayHint")
        .id(id)
        .params(
            serde_json::to_value(InlayHintParams {
                work_done_progress_params: Default::default(),
                text_document: TextDocumentIdentifier {
                    uri: uri.parse().unwrap(),
                },
                range: Range {
                    start: Position {
                        line: 0,
                        character: 0,
                    },
                    end: Position {
                        line: end_line,
                        character: 0,
                    },
                },
            })
            .unwrap(),
        )
        .finish()
}

/// Create a textDocument/hover request
#[allow(dead_code)]
pub fn create_hover_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/hover")
        .id(id)
        .params(
            serde_json::to_value(HoverParams {
                text_document_position_params: TextDocumentPositionParams {
                    text_document: TextDocumentIdentifier {
                        uri: uri.parse().unwrap(),
                    },
                    position: Position { line, character },
                },
                work_done_progress_params: Default::default(),
            })
            .unwrap(),
        )
        .finish()
}

/// Decode the successful result of a response
#[allow(dead_code)]
pub fn response_result<T: DeserializeOwned>(response: Option<Response>) -> T {
    let (_, result) = response.expect("Expected a response").into_parts();
    serde_json::from_value(result.expect("Expected a successful response")).unwrap()
}

/// Collect notifications in background and return a receiver
pub fn spawn_notification_collector(mut socket: ClientSocket) -> mpsc::Receiver<Request> {
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        while let Some(notification) = socket.next().await {
            if tx.send(notification).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Wait for a notification with the specified method name from the receiver
pub async fn wait_for_notification(
    rx: &mut mpsc::Receiver<Request>,
    method: &str,
) -> Option<Request> {
    let timeout_duration = Duration::from_secs(5);

    loop {
        match timeout(timeout_duration, rx.recv()).await {
            Ok(Some(notification)) => {
                if notification.method() == method {
                    return Some(notification);
                }
                // Skip other notifications (like log_message)
            }
            _ => return None,
        }
    }
}

/// Wait for the next publishDiagnostics notification and decode it
#[allow(dead_code)]
pub async fn wait_for_diagnostics(rx: &mut mpsc::Receiver<Request>) -> PublishDiagnosticsParams {
    let notification = wait_for_notification(rx, "textDocument/publishDiagnostics")
        .await
        .expect("Expected publishDiagnostics notification");

    serde_json::from_value(notification.params().unwrap().clone()).unwrap()
}
