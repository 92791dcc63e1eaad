//! Conversions between analysis results and protocol types

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString};

use crate::lsp::models::LspDocumentState;
use crate::validators::{Finding, Severity};

/// Source reported on every published diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "zenith";

pub fn diagnostic_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
    }
}

/// Converts a finding with a byte span into a diagnostic positioned against `state`.
pub fn finding_to_diagnostic(finding: &Finding, state: &LspDocumentState) -> Diagnostic {
    Diagnostic {
        range: state.range_of(&finding.span),
        severity: Some(diagnostic_severity(finding.severity)),
        code: Some(NumberOrString::String(finding.code.to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: finding.message.clone(),
        ..Default::default()
    }
}
