//! Static diagnostics for `.zen` documents
//!
//! Each check is an independent pass over the document producing
//! [`Finding`]s. Unresolvable references are soft (warning/information),
//! malformed fragments are errors. No check panics on malformed input.

pub mod components;
pub mod directives;
pub mod expressions;
pub mod imports;

use std::ops::Range;

use tracing::debug;

use crate::language_regions::{mask_non_template, scan_tags};
use crate::metadata::Metadata;
use crate::project::ProjectGraph;
use crate::script::ScriptSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Byte span in the document
    pub span: Range<usize>,
    pub message: String,
    /// Stable identifier of the check, e.g. `unresolved-component`
    pub code: &'static str,
}

impl Finding {
    pub fn error(span: Range<usize>, code: &'static str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, span, message: message.into(), code }
    }

    pub fn warning(span: Range<usize>, code: &'static str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, span, message: message.into(), code }
    }

    pub fn information(span: Range<usize>, code: &'static str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Information, span, message: message.into(), code }
    }
}

/// Runs every check over `text`, ordered by position. The component check is
/// skipped when no project graph is available.
pub fn validate(text: &str, graph: Option<&ProjectGraph>, metadata: &Metadata) -> Vec<Finding> {
    let template = mask_non_template(text);
    let tags = scan_tags(&template);
    let summary = ScriptSummary::from_document(text);

    let mut findings = Vec::new();
    if let Some(graph) = graph {
        findings.extend(components::check(&tags, &summary, graph));
    }
    findings.extend(directives::check(&tags, metadata));
    findings.extend(imports::check(&summary, metadata));
    findings.extend(expressions::check(&template, &tags));

    findings.sort_by(|a, b| a.span.start.cmp(&b.span.start).then(a.severity.cmp(&b.severity)));
    debug!("{} findings", findings.len());
    findings
}
