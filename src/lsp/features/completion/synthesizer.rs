//! Merges every suggestion source into one ranked list
//!
//! Sources are independent: declared script symbols, metadata (hooks,
//! directives, markup vocabulary), the project graph and the framework
//! imports of the document. The completion context decides which of them
//! contribute; [`rank_suggestions`] orders the union.

use tracing::debug;

use super::context::{CompletionContext, CompletionContextType, determine_context};
use super::ranking::{Tier, matches_prefix, rank_suggestions};
use super::suggestion::{Suggestion, SuggestionKind};
use crate::language_regions::{HostCategory, is_component_name};
use crate::metadata::{DIRECTIVE_PREFIX, ExportKind, HookMetadata, Metadata, NAVIGATION_LINK, ROUTER_MODULE};
use crate::project::ProjectGraph;
use crate::script::{ImportResolver, ScriptSummary};

/// Ranked suggestions for `offset` in `text`. Without a project graph the
/// component sources are empty.
pub fn complete(
    text: &str,
    offset: usize,
    graph: Option<&ProjectGraph>,
    metadata: &Metadata,
) -> Vec<Suggestion> {
    let context = determine_context(text, offset);
    let summary = ScriptSummary::from_document(text);
    let partial = context.partial_word();

    let mut suggestions = Vec::new();
    match &context.context_type {
        CompletionContextType::Script | CompletionContextType::Expression => {
            declared_state(&summary, partial, &mut suggestions);
            declared_functions(&summary, partial, &mut suggestions);
            hooks(metadata, partial, &mut suggestions);
            imported_names(&summary, metadata, partial, &mut suggestions);
        }
        CompletionContextType::DirectiveValue => {
            declared_state(&summary, partial, &mut suggestions);
            declared_functions(&summary, partial, &mut suggestions);
        }
        CompletionContextType::EventHandlerValue => {
            declared_functions(&summary, partial, &mut suggestions);
        }
        CompletionContextType::Attribute { tag_name, host } => {
            tag_attributes(&context, tag_name, *host, graph, metadata, &mut suggestions);
        }
        CompletionContextType::TagName | CompletionContextType::Template => {
            template_components(&summary, graph, metadata, partial, &mut suggestions);
            html_elements(metadata, partial, &mut suggestions);
        }
        CompletionContextType::AttributeValue | CompletionContextType::Style => {}
    }

    let ranked = rank_suggestions(suggestions);
    debug!(
        "{} suggestions for {:?} (partial {:?})",
        ranked.len(),
        context.context_type,
        context.region.partial
    );
    ranked
}

fn declared_state(summary: &ScriptSummary, partial: &str, out: &mut Vec<Suggestion>) {
    for (name, initializer) in &summary.state {
        if matches_prefix(name, partial) {
            out.push(
                Suggestion::new(name.as_str(), SuggestionKind::State, Tier::Declared)
                    .with_detail(format!("state {} = {}", name, initializer)),
            );
        }
    }
}

fn declared_functions(summary: &ScriptSummary, partial: &str, out: &mut Vec<Suggestion>) {
    for function in &summary.functions {
        if matches_prefix(&function.name, partial) {
            out.push(
                Suggestion::new(function.name.as_str(), SuggestionKind::Function, Tier::Declared)
                    .with_detail(function.signature()),
            );
        }
    }
}

fn hook_suggestion(hook: &HookMetadata) -> Suggestion {
    Suggestion::new(hook.name.as_str(), SuggestionKind::Hook, Tier::Framework)
        .with_detail(hook.signature.as_str())
        .with_documentation(hook.description.as_str())
        .with_snippet(hook.snippet.as_deref())
}

fn hooks(metadata: &Metadata, partial: &str, out: &mut Vec<Suggestion>) {
    let all = metadata.lifecycle_hooks.iter().chain(&metadata.navigation_hooks);
    out.extend(
        all.filter(|hook| matches_prefix(&hook.name, partial))
            .map(hook_suggestion),
    );
}

fn imported_names(summary: &ScriptSummary, metadata: &Metadata, partial: &str, out: &mut Vec<Suggestion>) {
    let resolver = ImportResolver::new(metadata);
    for import in &summary.imports {
        for name in &import.names {
            if !matches_prefix(&name.local, partial) {
                continue;
            }
            let export = resolver.resolve_export(&import.specifier, &name.name);
            let kind = match export.map(|e| e.kind) {
                Some(ExportKind::Component) => SuggestionKind::Component,
                Some(ExportKind::Type) => SuggestionKind::TypeName,
                Some(ExportKind::Function) => SuggestionKind::Function,
                Some(ExportKind::Constant) | None => SuggestionKind::Import,
            };
            let detail = export
                .and_then(|e| e.signature.clone())
                .unwrap_or_else(|| format!("from '{}'", import.specifier));
            out.push(
                Suggestion::new(name.local.as_str(), kind, Tier::Framework)
                    .with_detail(detail)
                    .with_documentation(export.map_or("", |e| e.description.as_str())),
            );
        }
    }
}

fn tag_attributes(
    context: &CompletionContext,
    tag_name: &str,
    host: HostCategory,
    graph: Option<&ProjectGraph>,
    metadata: &Metadata,
    out: &mut Vec<Suggestion>,
) {
    let partial = context.partial_word();

    if context.wants_directive() {
        directives(metadata, host, partial, out);
        return;
    }

    match context.sigil() {
        Some('@') => events(metadata, partial, out),
        Some(':') => {
            component_props(tag_name, graph, partial, ":", out);
            for attribute in &metadata.attributes {
                if matches_prefix(&attribute.name, partial) {
                    out.push(
                        Suggestion::new(format!(":{}", attribute.name), SuggestionKind::Attribute, Tier::Attributes)
                            .with_documentation(attribute.description.as_str()),
                    );
                }
            }
        }
        _ => {
            component_props(tag_name, graph, partial, "", out);
            directives(metadata, host, partial, out);
            for attribute in &metadata.attributes {
                if matches_prefix(&attribute.name, partial) {
                    out.push(
                        Suggestion::new(attribute.name.as_str(), SuggestionKind::Attribute, Tier::Attributes)
                            .with_documentation(attribute.description.as_str())
                            .with_snippet(Some(format!("{}=\"$1\"$0", attribute.name))),
                    );
                }
            }
            events(metadata, partial, out);
        }
    }
}

fn directives(metadata: &Metadata, host: HostCategory, partial: &str, out: &mut Vec<Suggestion>) {
    for directive in &metadata.directives {
        if !host.accepts(&directive.hosts) {
            continue;
        }
        let bare = directive.name.strip_prefix(DIRECTIVE_PREFIX).unwrap_or(&directive.name);
        if matches_prefix(bare, partial) || matches_prefix(&directive.name, partial) {
            out.push(
                Suggestion::new(directive.name.as_str(), SuggestionKind::Directive, Tier::Framework)
                    .with_documentation(directive.description.as_str())
                    .with_snippet(directive.snippet.as_deref()),
            );
        }
    }
}

fn events(metadata: &Metadata, partial: &str, out: &mut Vec<Suggestion>) {
    for event in &metadata.events {
        if matches_prefix(&event.name, partial) {
            out.push(
                Suggestion::new(format!("@{}", event.name), SuggestionKind::Event, Tier::Attributes)
                    .with_documentation(event.description.as_str())
                    .with_snippet(Some(format!("@{}=\"$1\"$0", event.name))),
            );
        }
    }
}

/// Properties of the project component named by the tag
fn component_props(
    tag_name: &str,
    graph: Option<&ProjectGraph>,
    partial: &str,
    sigil: &str,
    out: &mut Vec<Suggestion>,
) {
    let Some(component) = graph.and_then(|g| g.lookup(tag_name)) else {
        return;
    };
    for prop in &component.props {
        if matches_prefix(prop, partial) {
            out.push(
                Suggestion::new(format!("{}{}", sigil, prop), SuggestionKind::Property, Tier::Declared)
                    .with_detail(format!("{} property", component.name))
                    .with_snippet(Some(format!("{}{}={{$1}}$0", sigil, prop))),
            );
        }
    }
}

fn template_components(
    summary: &ScriptSummary,
    graph: Option<&ProjectGraph>,
    metadata: &Metadata,
    partial: &str,
    out: &mut Vec<Suggestion>,
) {
    if let Some(graph) = graph {
        for component in graph.embeddable() {
            if is_component_name(&component.name) && matches_prefix(&component.name, partial) {
                let mut suggestion =
                    Suggestion::new(component.name.as_str(), SuggestionKind::Component, Tier::Framework)
                        .with_detail(component.kind.label());
                if !component.props.is_empty() {
                    suggestion = suggestion.with_documentation(format!("Properties: `{}`", component.props.join("`, `")));
                }
                out.push(suggestion);
            }
        }
    }

    if summary.imports_module(ROUTER_MODULE) && matches_prefix(NAVIGATION_LINK, partial) {
        if let Some(link) = metadata.navigation_link() {
            out.push(
                Suggestion::new(NAVIGATION_LINK, SuggestionKind::Component, Tier::Framework)
                    .with_detail(format!("from '{}'", ROUTER_MODULE))
                    .with_documentation(link.description.as_str()),
            );
        }
    }
}

fn html_elements(metadata: &Metadata, partial: &str, out: &mut Vec<Suggestion>) {
    for element in &metadata.html_elements {
        if matches_prefix(&element.name, partial) {
            out.push(
                Suggestion::new(element.name.as_str(), SuggestionKind::Element, Tier::Markup)
                    .with_documentation(element.description.as_str()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    use crate::project::{ComponentInfo, ComponentKind};

    fn labels_at(marked: &str, graph: Option<&ProjectGraph>) -> Vec<Suggestion> {
        let offset = marked.find('|').unwrap();
        let text = marked.replacen('|', "", 1);
        complete(&text, offset, graph, &Metadata::builtin())
    }

    fn labels(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.label.as_str()).collect()
    }

    fn graph_with(components: &[(&str, &[&str])]) -> ProjectGraph {
        let mut graph = ProjectGraph::default();
        for (name, props) in components {
            graph.components.insert(
                name.to_string(),
                ComponentInfo {
                    name: name.to_string(),
                    path: PathBuf::from(format!("/p/src/components/{}.zen", name)),
                    kind: ComponentKind::Component,
                    props: props.iter().map(|p| p.to_string()).collect(),
                },
            );
        }
        graph
    }

    #[test]
    fn test_state_in_expression_is_declared_tier() {
        let doc = indoc! {r#"
            <script>
            state count = 0
            </script>
            <p>{c|}</p>
        "#};
        let suggestions = labels_at(doc, None);
        let count = suggestions.iter().find(|s| s.label == "count").unwrap();
        assert_eq!(count.tier, Tier::Declared);
        assert_eq!(count.sort_text(), "0_count");
        assert_eq!(suggestions[0].label, "count");
    }

    #[test]
    fn test_script_offers_hooks_and_imports() {
        let doc = indoc! {r#"
            <script>
            import { navigate } from 'zenith/router'
            zen|
            </script>
        "#};
        let suggestions = labels_at(doc, None);
        let names = labels(&suggestions);
        assert!(names.contains(&"zenOnMount"));
        assert!(names.contains(&"zenEffect"));
        assert!(suggestions.iter().all(|s| s.tier == Tier::Framework));
    }

    #[test]
    fn test_declared_name_shadows_hook() {
        let doc = "<script>\nfunction navigate() {}\n</script>\n<p>{nav|}</p>";
        let suggestions = labels_at(doc, None);
        let navigate: Vec<_> = suggestions.iter().filter(|s| s.label == "navigate").collect();
        assert_eq!(navigate.len(), 1);
        assert_eq!(navigate[0].tier, Tier::Declared);
    }

    #[test]
    fn test_event_handler_value_offers_functions_only() {
        let doc = indoc! {r#"
            <script>
            state saved = false
            function save() {}
            const reset = () => {}
            </script>
            <button @click="|"></button>
        "#};
        assert_eq!(labels(&labels_at(doc, None)), vec!["reset", "save"]);
    }

    #[test]
    fn test_directive_value_offers_state_and_functions() {
        let doc = "<script>\nstate open = true\nfunction ok() {}\n</script>\n<p zen:if=\"|\"></p>";
        assert_eq!(labels(&labels_at(doc, None)), vec!["ok", "open"]);
    }

    #[test]
    fn test_plain_attribute_value_and_style_are_empty() {
        assert!(labels_at("<a href=\"|\"></a>", None).is_empty());
        assert!(labels_at("<style>\n.a { | }\n</style>", None).is_empty());
    }

    #[test]
    fn test_element_attributes() {
        let suggestions = labels_at("<div |", None);
        let names = labels(&suggestions);
        assert!(names.contains(&"zen:html"));
        assert!(names.contains(&"class"));
        assert!(names.contains(&"@click"));
        let first_attribute = names.iter().position(|n| *n == "alt").unwrap();
        let last_directive = names.iter().rposition(|n| n.starts_with("zen:")).unwrap();
        assert!(last_directive < first_attribute);
    }

    #[test]
    fn test_sigils_restrict_attributes() {
        let events = labels_at("<button @cl|", None);
        assert_eq!(labels(&events), vec!["@click"]);

        let bindings = labels_at("<input :va|", None);
        assert_eq!(labels(&bindings), vec![":value"]);

        let directives = labels_at("<li zen:f|", None);
        assert_eq!(labels(&directives), vec!["zen:for"]);
    }

    #[test]
    fn test_component_host_gets_props_and_component_directives() {
        let graph = graph_with(&[("Card", &["title", "href"])]);
        let suggestions = labels_at("<Card |", Some(&graph));
        let names = labels(&suggestions);
        assert_eq!(&names[..2], &["href", "title"]);
        assert!(names.contains(&"zen:if"));
        assert!(!names.contains(&"zen:html"));
    }

    #[test]
    fn test_slot_accepts_no_directives() {
        let suggestions = labels_at("<slot zen:|", None);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_template_offers_components_then_elements() {
        let graph = graph_with(&[("Card", &[]), ("Badge", &[])]);
        let suggestions = labels_at("<div>\n  <|", Some(&graph));
        let names = labels(&suggestions);
        assert_eq!(&names[..2], &["Badge", "Card"]);
        assert!(names.contains(&"div"));
        assert!(suggestions[2..].iter().all(|s| s.tier == Tier::Markup));
    }

    #[test]
    fn test_navigation_link_requires_router_import() {
        let without = labels_at("<Zen|", None);
        assert!(without.is_empty());

        let doc = "<script>\nimport { navigate } from 'zenith/router'\n</script>\n<Zen|";
        assert_eq!(labels(&labels_at(doc, None)), vec!["ZenLink"]);
    }
}
