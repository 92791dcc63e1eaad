//! Hover explanations for identifiers in `.zen` documents
//!
//! The word under the cursor is looked up in a fixed order and the first
//! source that knows it produces the hover:
//!
//! ```text
//! directive → navigation hook → lifecycle hook → ZenLink (router imported)
//!   → state → function → imported symbol → project component → HTML element
//! ```

use std::ops::Range;

use tracing::debug;

use crate::language_regions::is_identifier_char;
use crate::metadata::{DIRECTIVE_PREFIX, ExportKind, HookMetadata, Metadata, NAVIGATION_LINK, ROUTER_MODULE};
use crate::project::ProjectGraph;
use crate::script::{ImportResolver, ModuleKind, ScriptSummary, find_imported};

/// Markdown hover text and the byte span of the hovered word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    pub contents: String,
    pub span: Range<usize>,
}

/// Builder for markdown hover contents
#[derive(Debug, Default)]
pub struct HoverBuilder {
    sections: Vec<String>,
}

impl HoverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.sections.push(format!("**{}**", title));
        self
    }

    pub fn code(mut self, language: &str, code: &str) -> Self {
        self.sections.push(format!("```{}\n{}\n```", language, code));
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.sections.push(text.to_string());
        }
        self
    }

    pub fn build(self) -> String {
        self.sections.join("\n\n")
    }
}

/// The word around `offset`: identifier characters before and after it,
/// extended over a `zen:` directive prefix or a leading `@`/`:` attribute
/// sigil. Returns `None` off a word.
pub fn word_at(text: &str, offset: usize) -> Option<(Range<usize>, &str)> {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map_or(offset, |(idx, _)| idx);
    let mut end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_identifier_char(*c))
        .map_or(text.len(), |(idx, _)| offset + idx);
    if start == end {
        return None;
    }

    let mut start = start;
    let prefix_len = DIRECTIVE_PREFIX.len();
    if text[..start].ends_with(DIRECTIVE_PREFIX) && is_word_boundary(text, start - prefix_len) {
        start -= prefix_len;
    } else if (text[..start].ends_with('@') || text[..start].ends_with(':')) && is_sigil_position(text, start - 1) {
        start -= 1;
    } else if &text[start..end] == "zen" && text[end..].starts_with(':') {
        let rest_end = text[end + 1..]
            .char_indices()
            .find(|(_, c)| !is_identifier_char(*c))
            .map_or(text.len(), |(idx, _)| end + 1 + idx);
        if rest_end > end + 1 {
            end = rest_end;
        }
    }

    Some((start..end, &text[start..end]))
}

fn is_word_boundary(text: &str, at: usize) -> bool {
    text[..at].chars().next_back().is_none_or(|c| !is_identifier_char(c))
}

/// A sigil opens an attribute only after whitespace
fn is_sigil_position(text: &str, at: usize) -> bool {
    text[..at].chars().next_back().is_some_and(char::is_whitespace)
}

/// Hover for the word at `offset`, or `None` when no source knows it
pub fn hover(
    text: &str,
    offset: usize,
    graph: Option<&ProjectGraph>,
    metadata: &Metadata,
) -> Option<HoverInfo> {
    let (span, word) = word_at(text, offset)?;
    let summary = ScriptSummary::from_document(text);

    let contents = directive_hover(word, metadata)
        .or_else(|| sigil_hover(word, metadata))
        .or_else(|| metadata.navigation_hook(word).map(|h| hook_hover(h, "Navigation hook")))
        .or_else(|| metadata.lifecycle_hook(word).map(|h| hook_hover(h, "Lifecycle hook")))
        .or_else(|| navigation_link_hover(word, &summary, metadata))
        .or_else(|| state_hover(word, &summary))
        .or_else(|| function_hover(word, &summary))
        .or_else(|| import_hover(word, &summary, metadata))
        .or_else(|| component_hover(word, graph))
        .or_else(|| element_hover(word, metadata))?;

    debug!("Hover for {:?} at {:?}", word, span);
    Some(HoverInfo { contents, span })
}

fn directive_hover(word: &str, metadata: &Metadata) -> Option<String> {
    let directive = metadata.directive(word)?;
    let mut hosts = Vec::new();
    if directive.hosts.element {
        hosts.push("elements");
    }
    if directive.hosts.component {
        hosts.push("components");
    }
    Some(
        HoverBuilder::new()
            .title(&directive.name)
            .description(&directive.description)
            .description(&format!("Allowed on: {}", hosts.join(", ")))
            .build(),
    )
}

/// `@event` handlers and `:name` bindings
fn sigil_hover(word: &str, metadata: &Metadata) -> Option<String> {
    if let Some(event) = word.strip_prefix('@') {
        let entry = metadata.event(event)?;
        return Some(
            HoverBuilder::new()
                .title(&format!("{} (event)", word))
                .description(&entry.description)
                .description(&format!("Calls the handler on `{}`.", entry.name))
                .build(),
        );
    }
    let name = word.strip_prefix(':')?;
    let mut builder = HoverBuilder::new()
        .title(&format!("{} (binding)", word))
        .description(&format!("Binds `{}` to the value of an expression.", name));
    if let Some(attribute) = metadata.attribute(name) {
        builder = builder.description(&attribute.description);
    }
    Some(builder.build())
}

fn hook_hover(hook: &HookMetadata, category: &str) -> String {
    HoverBuilder::new()
        .title(&format!("{} ({})", hook.name, category))
        .code("typescript", &hook.signature)
        .description(&hook.description)
        .build()
}

fn navigation_link_hover(word: &str, summary: &ScriptSummary, metadata: &Metadata) -> Option<String> {
    if word != NAVIGATION_LINK || !summary.imports_module(ROUTER_MODULE) {
        return None;
    }
    let link = metadata.navigation_link()?;
    let mut builder = HoverBuilder::new().title(&format!("{} (from '{}')", link.name, ROUTER_MODULE));
    if let Some(signature) = &link.signature {
        builder = builder.code("html", signature);
    }
    Some(builder.description(&link.description).build())
}

fn state_hover(word: &str, summary: &ScriptSummary) -> Option<String> {
    let initializer = summary.state.get(word)?;
    Some(
        HoverBuilder::new()
            .title(&format!("{} (state)", word))
            .code("typescript", &format!("state {} = {}", word, initializer))
            .build(),
    )
}

fn function_hover(word: &str, summary: &ScriptSummary) -> Option<String> {
    let function = summary.function(word)?;
    Some(
        HoverBuilder::new()
            .title(&format!("{} (function)", word))
            .code("typescript", &function.signature())
            .build(),
    )
}

fn import_hover(word: &str, summary: &ScriptSummary, metadata: &Metadata) -> Option<String> {
    let (import, name) = find_imported(&summary.imports, word)?;
    let resolver = ImportResolver::new(metadata);
    let module = resolver.resolve(&import.specifier);
    let origin = format!("Imported from `{}`", import.specifier);

    let Some(export) = resolver.resolve_export(&import.specifier, &name.name) else {
        let note = match (module.kind, module.is_known) {
            (ModuleKind::Plugin, false) => "Plugin module is not registered.",
            _ => "No metadata for this export.",
        };
        return Some(HoverBuilder::new().title(word).description(&origin).description(note).build());
    };

    let kind = match export.kind {
        ExportKind::Function => "function",
        ExportKind::Component => "component",
        ExportKind::Type => "type",
        ExportKind::Constant => "constant",
    };
    let mut builder = HoverBuilder::new().title(&format!("{} ({})", word, kind));
    if let Some(signature) = &export.signature {
        builder = builder.code("typescript", signature);
    }
    Some(builder.description(&export.description).description(&origin).build())
}

fn component_hover(word: &str, graph: Option<&ProjectGraph>) -> Option<String> {
    let component = graph?.lookup(word)?;
    let props = if component.props.is_empty() {
        "No inferred properties.".to_string()
    } else {
        format!("Properties: `{}`", component.props.join("`, `"))
    };
    Some(
        HoverBuilder::new()
            .title(&format!("{} ({})", component.name, component.kind.label()))
            .description(&format!("`{}`", component.path.display()))
            .description(&props)
            .build(),
    )
}

fn element_hover(word: &str, metadata: &Metadata) -> Option<String> {
    let element = metadata.html_element(word)?;
    Some(
        HoverBuilder::new()
            .title(&format!("<{}>", element.name))
            .description(&element.description)
            .build(),
    )
}
