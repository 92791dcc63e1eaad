//! Directive usage checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language_regions::{Attribute, HostCategory, Tag};
use crate::metadata::{DIRECTIVE_PREFIX, ITERATION_DIRECTIVE, Metadata, SLOT_ELEMENT};

use super::Finding;

pub const EMPTY_DIRECTIVE: &str = "empty-directive";
pub const MALFORMED_ITERATION: &str = "malformed-iteration";
pub const DIRECTIVE_ON_SLOT: &str = "directive-on-slot";
pub const UNSUPPORTED_HOST: &str = "unsupported-directive-host";
pub const UNKNOWN_DIRECTIVE: &str = "unknown-directive";

/// `item in items`, `item, index in items`, optionally parenthesized
static ITERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\(?\s*[A-Za-z_$][\w$]*\s*(?:,\s*[A-Za-z_$][\w$]*\s*)?\)?\s+in\s+\S")
        .expect("iteration pattern")
});

pub fn is_valid_iteration(value: &str) -> bool {
    ITERATION.is_match(value)
}

pub fn check(tags: &[Tag], metadata: &Metadata) -> Vec<Finding> {
    let mut findings = Vec::new();
    for tag in tags {
        let host = HostCategory::of(&tag.name);
        for attribute in tag.attributes.iter().filter(|a| a.name.starts_with(DIRECTIVE_PREFIX)) {
            check_directive(tag, host, attribute, metadata, &mut findings);
        }
    }
    findings
}

fn check_directive(
    tag: &Tag,
    host: HostCategory,
    attribute: &Attribute,
    metadata: &Metadata,
    findings: &mut Vec<Finding>,
) {
    let name = attribute.name.as_str();

    if host == HostCategory::Slot {
        findings.push(Finding::error(
            attribute.name_span.clone(),
            DIRECTIVE_ON_SLOT,
            format!("`{}` cannot be used on <{}>", name, SLOT_ELEMENT),
        ));
        return;
    }

    let Some(directive) = metadata.directive(name) else {
        findings.push(Finding::warning(
            attribute.name_span.clone(),
            UNKNOWN_DIRECTIVE,
            format!("Unknown directive `{}`", name),
        ));
        return;
    };

    if !host.accepts(&directive.hosts) {
        findings.push(Finding::warning(
            attribute.name_span.clone(),
            UNSUPPORTED_HOST,
            format!("`{}` has no effect on component <{}>", name, tag.name),
        ));
    }

    let value = match &attribute.value {
        Some(value) if !value.text.trim().is_empty() => value,
        _ => {
            findings.push(Finding::error(
                attribute.name_span.clone(),
                EMPTY_DIRECTIVE,
                format!("`{}` needs a value", name),
            ));
            return;
        }
    };

    if name == ITERATION_DIRECTIVE && !is_valid_iteration(&value.text) {
        findings.push(Finding::error(
            value.span.clone(),
            MALFORMED_ITERATION,
            format!(
                "`{}` expects `item in items` or `item, index in items`, found `{}`",
                name, value.text
            ),
        ));
    }
}
