//! Integration tests for script symbol extraction and import resolution

use indoc::indoc;
use zenith_language_server::metadata::Metadata;
use zenith_language_server::script::{
    ImportKind, ImportResolver, ModuleKind, ScriptSummary, extract_functions, extract_state,
};

const PAGE: &str = indoc! {r#"
    <script>
      import { onMount } from 'zenith'
      import { navigate, type RouteParams } from 'zenith/router'
      import * as content from 'zenith:content'
      import dayjs from 'dayjs'

      state count = 0
      state user = { name: 'Ada' };
      state count = 10

      function increment() { count += 1 }
      async function load(id, options) { }
      const reset = () => { count = 0 }
      const double = value => value * 2
    </script>
    <p>{count}</p>
"#};

#[test]
fn test_state_initializers_last_wins() {
    let summary = ScriptSummary::from_document(PAGE);
    let state: Vec<(&str, &str)> = summary.state.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(state, vec![("count", "10"), ("user", "{ name: 'Ada' }")]);
}

#[test]
fn test_state_ignores_comparisons_and_words() {
    let state = extract_state("if (state == ready) {}\nconst statement = 1\nstate ok = true");
    assert_eq!(state.len(), 1);
    assert_eq!(state.get("ok").map(String::as_str), Some("true"));
}

#[test]
fn test_function_forms() {
    let summary = ScriptSummary::from_document(PAGE);
    let names: Vec<&str> = summary.functions.iter().map(|f| f.name.as_str()).collect();
    for expected in ["increment", "load", "reset", "double"] {
        assert!(names.contains(&expected), "missing {} in {:?}", expected, names);
    }

    let load = summary.function("load").unwrap();
    assert!(load.is_async);
    assert_eq!(load.params, "id, options");
    assert_eq!(summary.function("double").unwrap().params, "value");
}

#[test]
fn test_functions_without_script_block() {
    assert!(ScriptSummary::from_document("<p>function notCode() {}</p>").functions.is_empty());
    assert!(extract_functions("").is_empty());
}

#[test]
fn test_imports_are_document_relative() {
    let summary = ScriptSummary::from_document(PAGE);
    // Only framework imports are collected
    assert_eq!(summary.imports.len(), 3);

    let router = &summary.imports[1];
    assert_eq!(router.specifier, "zenith/router");
    assert_eq!(&PAGE[router.specifier_span.clone()], "zenith/router");
    assert_eq!(router.line, 2);

    let navigate = &router.names[0];
    assert_eq!(navigate.kind, ImportKind::Named);
    assert_eq!(&PAGE[navigate.span.clone()], "navigate");

    let namespace = &summary.imports[2].names[0];
    assert_eq!(namespace.kind, ImportKind::Namespace);
    assert_eq!(namespace.local, "content");

    assert!(summary.imports_module("zenith/router"));
    assert!(!summary.imports_module("zenith/reactivity"));
}

#[test]
fn test_resolve_is_total() {
    let metadata = Metadata::builtin();
    let resolver = ImportResolver::new(&metadata);

    for specifier in ["", "zenith", "zenith/router", "zenith/unknown", "zenith:", "zenith:nope", "react", "./local"] {
        let resolved = resolver.resolve(specifier);
        if resolved.kind == ModuleKind::Core {
            assert!(resolved.is_known, "core module {:?} must be known", specifier);
        }
    }

    assert_eq!(resolver.resolve("zenith").kind, ModuleKind::Core);
    assert_eq!(resolver.resolve("zenith/unknown").kind, ModuleKind::Core);
    assert!(resolver.resolve("zenith:content").is_known);
    assert!(!resolver.resolve("zenith:nope").is_known);
    assert_eq!(resolver.resolve("react").kind, ModuleKind::External);
}

#[test]
fn test_resolve_export() {
    let metadata = Metadata::builtin();
    let resolver = ImportResolver::new(&metadata);
    assert!(resolver.resolve_export("zenith/router", "navigate").is_some());
    assert!(resolver.resolve_export("zenith/router", "teleport").is_none());
    assert!(resolver.resolve_export("dayjs", "default").is_none());
}
