//! Dynamic code execution inside template expressions

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language_regions::{Tag, ValueDelimiter, is_event_attribute};
use crate::metadata::DIRECTIVE_PREFIX;

use super::Finding;

pub const UNSAFE_EXPRESSION: &str = "unsafe-expression";

/// `new Function(` is listed first so it is reported once, not again as `Function(`
static UNSAFE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bnew\s+Function\s*\(|\beval\s*\(|\bFunction\s*\(|\bwith\s*\(")
        .expect("unsafe expression pattern")
});

/// Checks every `{...}` expression of the masked template and the quoted
/// values of directive and event-handler attributes.
pub fn check(template: &str, tags: &[Tag]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let quoted_code: Vec<Range<usize>> = tags
        .iter()
        .flat_map(|tag| &tag.attributes)
        .filter(|a| a.name.starts_with(DIRECTIVE_PREFIX) || is_event_attribute(&a.name))
        .filter_map(|a| a.value.as_ref())
        .filter(|value| value.delimiter != ValueDelimiter::Braces)
        .map(|value| value.span.clone())
        .collect();

    // Quoted code values are scanned on their own, so their braces must not
    // open template expressions as well
    let unquoted = blank(template, &quoted_code);
    for range in expression_ranges(&unquoted) {
        scan(template, range, &mut findings);
    }
    for range in quoted_code {
        scan(template, range, &mut findings);
    }

    findings
}

/// Replaces every character inside `ranges` with spaces of the same byte width
fn blank(text: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);
    let mut pending = sorted.iter().peekable();

    for (idx, c) in text.char_indices() {
        while pending.peek().is_some_and(|r| r.end <= idx) {
            pending.next();
        }
        match pending.peek() {
            Some(r) if r.start <= idx => out.extend(std::iter::repeat_n(' ', c.len_utf8())),
            _ => out.push(c),
        }
    }
    out
}

fn scan(text: &str, range: Range<usize>, findings: &mut Vec<Finding>) {
    let base = range.start;
    for found in UNSAFE_PATTERN.find_iter(&text[range]) {
        let construct = found.as_str().trim_end_matches('(').trim_end();
        findings.push(Finding::error(
            base + found.start()..base + found.end(),
            UNSAFE_EXPRESSION,
            format!("`{}` executes dynamically built code and is not allowed in templates", construct),
        ));
    }
}

/// Body ranges of top-level `{...}` expressions. An unterminated expression
/// runs to the end of the text.
fn expression_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = idx + 1;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    ranges.push(start..idx);
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        ranges.push(start..text.len());
    }
    ranges
}
