//! Changelog hover

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::changelog::ChangelogResolver;
use crate::parser::HoverExtractor;
use crate::parser::types::FileType;

pub fn changelog_markdown(name: &str, version: &str, changelog: &str) -> String {
    format!("## {} {} Changelog\n\n{}", name, version, changelog)
}

/// Hover for the dependency declared on `line`, if its changelog resolves.
/// `file_hint` is the document path.
pub async fn changelog_hover(
    extractor: &HoverExtractor,
    resolver: &ChangelogResolver,
    file_type: FileType,
    file_hint: &str,
    line: &str,
) -> Option<Hover> {
    let dependency = extractor.extract(file_type, line)?;
    let changelog = resolver
        .resolve(&dependency.name, &dependency.version, file_hint)
        .await?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: changelog_markdown(&dependency.name, &dependency.version, &changelog),
        }),
        range: None,
    })
}
