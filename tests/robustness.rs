//! Property tests: every analysis entry point is total over arbitrary input

use quickcheck::{QuickCheck, TestResult};
use zenith_language_server::language_regions::{classify, find_blocks, scan_tags};
use zenith_language_server::lsp::features::completion::complete;
use zenith_language_server::lsp::features::hover::hover;
use zenith_language_server::metadata::Metadata;
use zenith_language_server::project::ProjectGraph;
use zenith_language_server::script::ScriptSummary;
use zenith_language_server::validators::validate;

/// Wraps arbitrary fragments in markup so the generated text reaches tags,
/// expressions and embedded blocks rather than plain text only.
fn document(script: &str, attribute: &str, body: &str) -> String {
    format!(
        "<script>\nstate a = 1\n{}\n</script>\n<div zen:for=\"{}\" @click={{{}}}>{{{}}}</div>\n<Card {} />\n<style>{}</style>",
        script, attribute, body, body, attribute, body
    )
}

#[test]
fn test_analysis_never_panics() {
    fn prop(script: String, attribute: String, body: String, offset: usize) -> TestResult {
        let metadata = Metadata::builtin();
        let graph = ProjectGraph::default();
        for text in [document(&script, &attribute, &body), format!("{}{}{}", script, attribute, body)] {
            let offset = offset % (text.len() + 2);
            let _ = classify(&text, offset);
            let _ = complete(&text, offset, Some(&graph), &metadata);
            let _ = hover(&text, offset, None, &metadata);
            let _ = validate(&text, Some(&graph), &metadata);
            let _ = find_blocks(&text);
            let _ = scan_tags(&text);
            let _ = ScriptSummary::from_document(&text);
        }
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(200)
        .max_tests(2000)
        .quickcheck(prop as fn(String, String, String, usize) -> TestResult);
}

#[test]
fn test_findings_stay_inside_the_document() {
    fn prop(script: String, attribute: String, body: String) -> TestResult {
        let metadata = Metadata::builtin();
        let graph = ProjectGraph::default();
        let text = document(&script, &attribute, &body);
        let findings = validate(&text, Some(&graph), &metadata);
        let in_bounds = findings.iter().all(|f| {
            f.span.start <= f.span.end
                && f.span.end <= text.len()
                && text.is_char_boundary(f.span.start)
                && text.is_char_boundary(f.span.end)
        });
        TestResult::from_bool(in_bounds)
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(String, String, String) -> TestResult);
}
