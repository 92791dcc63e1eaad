//! Built-in metadata tables

use super::{
    DirectiveHosts, DirectiveMetadata, ExportKind, ExportMetadata, HookMetadata, Metadata,
    ModuleMetadata, VocabularyEntry,
};

pub(super) fn tables() -> Metadata {
    Metadata {
        directives: directives(),
        lifecycle_hooks: lifecycle_hooks(),
        navigation_hooks: navigation_hooks(),
        core_modules: core_modules(),
        plugin_modules: plugin_modules(),
        html_elements: vocabulary(HTML_ELEMENTS),
        attributes: vocabulary(ATTRIBUTES),
        events: vocabulary(EVENTS),
    }
}

fn directive(name: &str, description: &str, component: bool) -> DirectiveMetadata {
    DirectiveMetadata {
        name: name.to_string(),
        description: description.to_string(),
        snippet: Some(format!("{}=\"$1\"$0", name)),
        hosts: DirectiveHosts { element: true, component },
    }
}

fn directives() -> Vec<DirectiveMetadata> {
    vec![
        directive("zen:if", "Render the element only while the expression is truthy.", true),
        DirectiveMetadata {
            snippet: Some("zen:for=\"${1:item} in ${2:items}\"$0".to_string()),
            ..directive(
                "zen:for",
                "Render the element once per entry of a list: `item in items` or `item, index in items`.",
                true,
            )
        },
        directive("zen:show", "Toggle the element's visibility without removing it from the page.", true),
        directive("zen:key", "Stable identity for an element rendered by `zen:for`.", true),
        directive("zen:html", "Set the element's inner HTML from an expression.", false),
        directive("zen:ref", "Bind the rendered DOM node to a `zenRef` in the script.", false),
    ]
}

fn hook(name: &str, signature: &str, description: &str, snippet: &str) -> HookMetadata {
    HookMetadata {
        name: name.to_string(),
        signature: signature.to_string(),
        description: description.to_string(),
        snippet: Some(snippet.to_string()),
    }
}

fn lifecycle_hooks() -> Vec<HookMetadata> {
    vec![
        hook(
            "zenOnMount",
            "zenOnMount(callback: () => void | (() => void)): void",
            "Run a callback after the component is mounted. A returned function runs on destroy.",
            "zenOnMount(() => {\n\t$0\n})",
        ),
        hook(
            "zenOnDestroy",
            "zenOnDestroy(callback: () => void): void",
            "Run a callback when the component is removed from the page.",
            "zenOnDestroy(() => {\n\t$0\n})",
        ),
        hook(
            "zenEffect",
            "zenEffect(effect: () => void | (() => void)): () => void",
            "Re-run a side effect whenever the state it reads changes.",
            "zenEffect(() => {\n\t$0\n})",
        ),
        hook(
            "zenMemo",
            "zenMemo<T>(compute: () => T): () => T",
            "Cache a derived value and recompute it only when its dependencies change.",
            "zenMemo(() => $0)",
        ),
        hook(
            "zenRef",
            "zenRef<T extends Element>(): { current: T | null }",
            "Create a reference filled by a `zen:ref` directive.",
            "zenRef()",
        ),
        hook(
            "zenBatch",
            "zenBatch(fn: () => void): void",
            "Group several state writes into a single update.",
            "zenBatch(() => {\n\t$0\n})",
        ),
        hook(
            "zenUntrack",
            "zenUntrack<T>(fn: () => T): T",
            "Read state without subscribing the current effect to it.",
            "zenUntrack(() => $0)",
        ),
        hook(
            "onMount",
            "onMount(callback: () => void | (() => void)): void",
            "Alias of `zenOnMount`.",
            "onMount(() => {\n\t$0\n})",
        ),
        hook(
            "onDestroy",
            "onDestroy(callback: () => void): void",
            "Alias of `zenOnDestroy`.",
            "onDestroy(() => {\n\t$0\n})",
        ),
    ]
}

fn navigation_hooks() -> Vec<HookMetadata> {
    vec![
        hook(
            "navigate",
            "navigate(to: string, options?: { replace?: boolean }): Promise<void>",
            "Navigate to another route without a full page load.",
            "navigate('$1')$0",
        ),
        hook(
            "getRoute",
            "getRoute(): { path: string; params: Record<string, string>; query: URLSearchParams }",
            "Read the current route, its parameters and query string.",
            "getRoute()",
        ),
        hook(
            "isActive",
            "isActive(path: string, exact?: boolean): boolean",
            "Check whether a path matches the current route.",
            "isActive('$1')$0",
        ),
        hook(
            "prefetch",
            "prefetch(path: string): Promise<void>",
            "Load a route's code ahead of navigation.",
            "prefetch('$1')$0",
        ),
        hook("back", "back(): void", "Go back one entry in the navigation history.", "back()"),
    ]
}

fn export(name: &str, kind: ExportKind, signature: Option<&str>, description: &str) -> ExportMetadata {
    ExportMetadata {
        name: name.to_string(),
        kind,
        signature: signature.map(str::to_string),
        description: description.to_string(),
    }
}

fn hooks_as_exports(hooks: &[HookMetadata]) -> Vec<ExportMetadata> {
    hooks
        .iter()
        .map(|h| export(&h.name, ExportKind::Function, Some(&h.signature), &h.description))
        .collect()
}

fn core_modules() -> Vec<ModuleMetadata> {
    let mut router_exports = hooks_as_exports(&navigation_hooks());
    router_exports.push(export(
        "ZenLink",
        ExportKind::Component,
        Some("<ZenLink href=\"/path\">...</ZenLink>"),
        "Client-side navigation link. Prefetches the target route on hover.",
    ));
    router_exports.push(export(
        "Route",
        ExportKind::Type,
        None,
        "Shape of the value returned by `getRoute()`.",
    ));

    vec![
        ModuleMetadata {
            specifier: "zenith".to_string(),
            description: "Core runtime: lifecycle hooks and reactivity primitives.".to_string(),
            exports: hooks_as_exports(&lifecycle_hooks()),
        },
        ModuleMetadata {
            specifier: "zenith/router".to_string(),
            description: "File-based router: navigation helpers and the `ZenLink` component.".to_string(),
            exports: router_exports,
        },
        ModuleMetadata {
            specifier: "zenith/reactivity".to_string(),
            description: "Standalone reactive primitives usable outside components.".to_string(),
            exports: vec![
                export("signal", ExportKind::Function, Some("signal<T>(value: T): Signal<T>"), "Create a reactive value."),
                export("computed", ExportKind::Function, Some("computed<T>(fn: () => T): Computed<T>"), "Derive a read-only reactive value."),
                export("effect", ExportKind::Function, Some("effect(fn: () => void): () => void"), "Run a side effect when dependencies change."),
                export("batch", ExportKind::Function, Some("batch(fn: () => void): void"), "Group several writes into one update."),
                export("Signal", ExportKind::Type, None, "A readable and writable reactive value."),
            ],
        },
    ]
}

fn plugin_modules() -> Vec<ModuleMetadata> {
    vec![
        ModuleMetadata {
            specifier: "zenith:content".to_string(),
            description: "Content collections loaded from Markdown and JSON files.".to_string(),
            exports: vec![
                export("zenCollection", ExportKind::Function, Some("zenCollection(name: string): Collection"), "Query a content collection."),
                export("getEntry", ExportKind::Function, Some("getEntry(collection: string, slug: string): Entry | undefined"), "Load a single entry of a collection."),
                export("Entry", ExportKind::Type, None, "A content entry with frontmatter and body."),
            ],
        },
        ModuleMetadata {
            specifier: "zenith:image".to_string(),
            description: "Responsive image optimisation.".to_string(),
            exports: vec![export(
                "Image",
                ExportKind::Component,
                Some("<Image src=\"...\" alt=\"...\" width={...} />"),
                "Image component emitting optimised responsive sources.",
            )],
        },
        ModuleMetadata {
            specifier: "zenith:i18n".to_string(),
            description: "Message catalogs and locale-aware formatting.".to_string(),
            exports: vec![
                export("t", ExportKind::Function, Some("t(key: string, params?: Record<string, unknown>): string"), "Translate a message key."),
                export("locale", ExportKind::Function, Some("locale(): string"), "Read the active locale."),
            ],
        },
    ]
}

fn vocabulary(entries: &[(&str, &str)]) -> Vec<VocabularyEntry> {
    entries
        .iter()
        .map(|(name, description)| VocabularyEntry {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

const HTML_ELEMENTS: &[(&str, &str)] = &[
    ("a", "Hyperlink."),
    ("article", "Self-contained composition."),
    ("aside", "Content tangential to the main content."),
    ("button", "Clickable button."),
    ("div", "Generic block container."),
    ("footer", "Footer of its nearest sectioning content."),
    ("form", "Interactive form."),
    ("h1", "Top-level heading."),
    ("h2", "Second-level heading."),
    ("h3", "Third-level heading."),
    ("header", "Introductory content."),
    ("img", "Embedded image."),
    ("input", "Form input control."),
    ("label", "Caption for a form control."),
    ("li", "List item."),
    ("main", "Dominant content of the document."),
    ("nav", "Section with navigation links."),
    ("ol", "Ordered list."),
    ("option", "Option of a select element."),
    ("p", "Paragraph."),
    ("section", "Generic document section."),
    ("select", "Drop-down selection control."),
    ("slot", "Outlet where a layout or component renders its children."),
    ("span", "Generic inline container."),
    ("table", "Tabular data."),
    ("td", "Table data cell."),
    ("textarea", "Multi-line text input."),
    ("th", "Table header cell."),
    ("tr", "Table row."),
    ("ul", "Unordered list."),
];

const ATTRIBUTES: &[(&str, &str)] = &[
    ("alt", "Alternative text for an image."),
    ("class", "Space-separated list of CSS classes."),
    ("disabled", "Disable the form control."),
    ("href", "Link target URL."),
    ("id", "Unique element identifier."),
    ("name", "Name of the form control."),
    ("placeholder", "Hint shown in an empty input."),
    ("src", "Resource URL."),
    ("style", "Inline CSS declarations."),
    ("title", "Advisory tooltip text."),
    ("type", "Type of the control or button."),
    ("value", "Current value of the control."),
];

const EVENTS: &[(&str, &str)] = &[
    ("blur", "The element lost focus."),
    ("change", "The control's value was committed."),
    ("click", "The element was clicked."),
    ("focus", "The element received focus."),
    ("input", "The control's value changed."),
    ("keydown", "A key was pressed."),
    ("keyup", "A key was released."),
    ("mouseenter", "The pointer entered the element."),
    ("mouseleave", "The pointer left the element."),
    ("submit", "The form was submitted."),
];
