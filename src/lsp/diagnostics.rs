//! Rendering of pass verdicts as inlay hints and diagnostics

use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, InlayHint, InlayHintLabel, Position, Range,
};

use crate::lsp::process::{LineMark, ManifestReport};

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Label appended to up-to-date lines
pub const UP_TO_DATE_LABEL: &str = " ✅";

/// Label appended to lines that can be updated to `latest`
pub fn update_label(latest: &str) -> String {
    format!(" 🆙 {}", latest)
}

fn position(mark: &LineMark) -> Position {
    Position {
        line: mark.line,
        character: mark.column,
    }
}

fn hint(mark: &LineMark, label: String) -> InlayHint {
    InlayHint {
        position: position(mark),
        label: InlayHintLabel::String(label),
        kind: None,
        text_edits: None,
        tooltip: None,
        padding_left: None,
        padding_right: None,
        data: None,
    }
}

/// Inlay hints for every annotated line, ordered by position.
/// One label is built per distinct target version.
pub fn generate_inlay_hints(report: &ManifestReport) -> Vec<InlayHint> {
    let mut hints: Vec<InlayHint> = report
        .up_to_date
        .iter()
        .map(|mark| hint(mark, UP_TO_DATE_LABEL.to_string()))
        .collect();

    for (latest, marks) in report.grouped_updates() {
        let label = update_label(&latest);
        hints.extend(marks.iter().map(|mark| hint(mark, label.clone())));
    }

    hints.sort_by_key(|hint| (hint.position.line, hint.position.character));
    hints
}

/// Hint-level diagnostics for lines that can be updated
pub fn generate_diagnostics(report: &ManifestReport) -> Vec<Diagnostic> {
    report
        .needs_update
        .iter()
        .map(|update| Diagnostic {
            range: Range {
                start: Position {
                    line: update.mark.line,
                    character: 0,
                },
                end: position(&update.mark),
            },
            severity: Some(DiagnosticSeverity::HINT),
            message: format!(
                "Update available: {} -> {}",
                update.current_version, update.latest_version
            ),
            source: Some(PACKAGE_NAME.to_string()),
            ..Default::default()
        })
        .collect()
}
