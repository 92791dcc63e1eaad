//! Property inference for component files
//!
//! Two sources are merged: field names of a `Props` interface or object type
//! alias, then names from a fixed vocabulary that the template references as
//! bare expressions (`{title}`). Field lists are matched up to the first `}`,
//! so nested object types end the scan early.

use std::path::Path;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::ZenithError;
use crate::language_regions::mask_non_template;

/// Names inferred as properties when a template uses them as `{name}`
pub const PROP_VOCABULARY: &[&str] = &[
    "title",
    "description",
    "href",
    "label",
    "items",
    "children",
    "class",
    "style",
    "id",
    "name",
    "value",
    "disabled",
    "src",
    "alt",
];

static PROPS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:interface\s+Props\b[^{]*|type\s+Props\s*=\s*)\{([^}]*)\}")
        .expect("props declaration pattern")
});

static PROPS_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[;,{\n])\s*(?:readonly\s+)?([A-Za-z_$][\w$]*)\s*\??\s*:").expect("props field pattern")
});

static BARE_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*([A-Za-z_$][\w$]*)\s*\}").expect("bare expression pattern"));

/// Inferred property names of a component source, deduplicated in first-seen order
pub fn infer_props(text: &str) -> Vec<String> {
    let mut props = IndexSet::new();

    for declaration in PROPS_DECLARATION.captures_iter(text) {
        for field in PROPS_FIELD.captures_iter(&declaration[1]) {
            props.insert(field[1].to_string());
        }
    }

    let template = mask_non_template(text);
    for reference in BARE_EXPRESSION.captures_iter(&template) {
        let name = &reference[1];
        if PROP_VOCABULARY.contains(&name) {
            props.insert(name.to_string());
        }
    }

    props.into_iter().collect()
}

/// Reads `path` and infers its properties. Unreadable files have none.
pub fn read_props(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => infer_props(&text),
        Err(source) => {
            let err = ZenithError::io(path, source);
            warn!("Skipping property inference: {}", err);
            Vec::new()
        }
    }
}
