//! Framework import statements and module resolution
//!
//! Only specifiers in the framework namespaces are kept: the bare core module
//! `zenith`, its submodules `zenith/...`, and plugins `zenith:...`. Everything
//! else in the script is ignored by the parser; [`ImportResolver::resolve`]
//! still classifies arbitrary specifiers as external.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::{ExportMetadata, Metadata, ModuleMetadata};

pub const CORE_MODULE: &str = "zenith";
pub const PLUGIN_PREFIX: &str = "zenith:";

/// `import [type] <clause> from '<specifier>'`, possibly spanning lines
static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+(type\s+)?([\w$\s{},*]+?)\s*from\s*['"]([^'"\n]+)['"]"#)
        .expect("import pattern")
});

/// `import '<specifier>'`
static IMPORT_SIDE_EFFECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bimport\s*['"]([^'"\n]+)['"]"#).expect("side-effect import pattern"));

static CLAUSE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_$][\w$]*|[*{},]").expect("import clause token pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    /// Name as exported by the module. For `{ a as b }` this is `a`; default
    /// and namespace bindings have no source name and repeat the local one.
    pub name: String,
    /// Binding visible in the script
    pub local: String,
    pub kind: ImportKind,
    /// Span of `name` in the scanned text
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub specifier: String,
    /// Span of the specifier text, quotes excluded
    pub specifier_span: Range<usize>,
    pub names: Vec<ImportedName>,
    pub type_only: bool,
    /// 0-based line of the `import` keyword
    pub line: usize,
    pub span: Range<usize>,
}

impl ParsedImport {
    /// Moves every span by `bytes` and the line by `lines`, turning
    /// script-relative positions into document positions.
    pub fn shift(&mut self, bytes: usize, lines: usize) {
        let shift = |range: &Range<usize>| range.start + bytes..range.end + bytes;
        self.specifier_span = shift(&self.specifier_span);
        self.span = shift(&self.span);
        for name in &mut self.names {
            name.span = shift(&name.span);
        }
        self.line += lines;
    }
}

pub fn is_framework_specifier(specifier: &str) -> bool {
    specifier == CORE_MODULE
        || specifier.starts_with(PLUGIN_PREFIX)
        || specifier
            .strip_prefix(CORE_MODULE)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Parses every framework import of `script`, in source order
pub fn parse_imports(script: &str) -> Vec<ParsedImport> {
    let mut imports = Vec::new();

    for captures in IMPORT_FROM.captures_iter(script) {
        let (Some(whole), Some(clause), Some(specifier)) = (captures.get(0), captures.get(2), captures.get(3))
        else {
            continue;
        };
        if !is_framework_specifier(specifier.as_str()) {
            continue;
        }
        imports.push(ParsedImport {
            specifier: specifier.as_str().to_string(),
            specifier_span: specifier.range(),
            names: parse_clause(clause.as_str(), clause.start()),
            type_only: captures.get(1).is_some(),
            line: line_of(script, whole.start()),
            span: whole.range(),
        });
    }

    for captures in IMPORT_SIDE_EFFECT.captures_iter(script) {
        let (Some(whole), Some(specifier)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if !is_framework_specifier(specifier.as_str()) {
            continue;
        }
        imports.push(ParsedImport {
            specifier: specifier.as_str().to_string(),
            specifier_span: specifier.range(),
            names: Vec::new(),
            type_only: false,
            line: line_of(script, whole.start()),
            span: whole.range(),
        });
    }

    imports.sort_by_key(|import| import.span.start);
    imports
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|b| *b == b'\n').count()
}

fn parse_clause(clause: &str, base: usize) -> Vec<ImportedName> {
    let tokens: Vec<(usize, &str)> = CLAUSE_TOKEN
        .find_iter(clause)
        .map(|m| (m.start(), m.as_str()))
        .collect();
    let is_binding = |i: usize| {
        tokens
            .get(i)
            .is_some_and(|(_, t)| !matches!(*t, "*" | "{" | "}" | ","))
    };

    let mut names = Vec::new();
    let mut in_braces = false;
    let mut i = 0;

    while i < tokens.len() {
        let (start, token) = tokens[i];
        match token {
            "{" => in_braces = true,
            "}" => in_braces = false,
            "," => {}
            "*" => {
                // `* as ns`
                if tokens.get(i + 1).is_some_and(|(_, t)| *t == "as") && is_binding(i + 2) {
                    let (local_start, local) = tokens[i + 2];
                    names.push(ImportedName {
                        name: local.to_string(),
                        local: local.to_string(),
                        kind: ImportKind::Namespace,
                        span: base + local_start..base + local_start + local.len(),
                    });
                    i += 2;
                }
            }
            // Inline modifier: `{ type Props, a }`
            "type" if in_braces && is_binding(i + 1) && tokens[i + 1].1 != "as" => {}
            _ => {
                let local = if tokens.get(i + 1).is_some_and(|(_, t)| *t == "as") && is_binding(i + 2) {
                    let alias = tokens[i + 2].1;
                    i += 2;
                    alias
                } else {
                    token
                };
                let kind = if in_braces { ImportKind::Named } else { ImportKind::Default };
                names.push(ImportedName {
                    name: token.to_string(),
                    local: local.to_string(),
                    kind,
                    span: base + start..base + start + token.len(),
                });
            }
        }
        i += 1;
    }

    names
}

/// The import binding `local` in `imports`, if any
pub fn find_imported<'a>(
    imports: &'a [ParsedImport],
    local: &str,
) -> Option<(&'a ParsedImport, &'a ImportedName)> {
    imports.iter().find_map(|import| {
        import
            .names
            .iter()
            .find(|name| name.local == local)
            .map(|name| (import, name))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Core,
    Plugin,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule<'m> {
    pub kind: ModuleKind,
    /// Core modules are always known; plugins are known when registered
    pub is_known: bool,
    pub metadata: Option<&'m ModuleMetadata>,
}

/// Resolves module specifiers against the metadata registries
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'m> {
    metadata: &'m Metadata,
}

impl<'m> ImportResolver<'m> {
    pub fn new(metadata: &'m Metadata) -> Self {
        Self { metadata }
    }

    pub fn resolve(&self, specifier: &str) -> ResolvedModule<'m> {
        if specifier.starts_with(PLUGIN_PREFIX) {
            let metadata = self.metadata.plugin_module(specifier);
            ResolvedModule {
                kind: ModuleKind::Plugin,
                is_known: metadata.is_some(),
                metadata,
            }
        } else if is_framework_specifier(specifier) {
            ResolvedModule {
                kind: ModuleKind::Core,
                is_known: true,
                metadata: self.metadata.core_module(specifier),
            }
        } else {
            ResolvedModule {
                kind: ModuleKind::External,
                is_known: false,
                metadata: None,
            }
        }
    }

    pub fn resolve_export(&self, specifier: &str, name: &str) -> Option<&'m ExportMetadata> {
        self.resolve(specifier).metadata?.export(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn names(import: &ParsedImport) -> Vec<(&str, &str)> {
        import
            .names
            .iter()
            .map(|n| (n.name.as_str(), n.local.as_str()))
            .collect()
    }

    #[test]
    fn test_named_and_aliased_imports() {
        let script = "import { navigate, isActive as active } from 'zenith/router'";
        let imports = parse_imports(script);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "zenith/router");
        assert_eq!(names(&imports[0]), vec![("navigate", "navigate"), ("isActive", "active")]);
        assert!(imports[0].names.iter().all(|n| n.kind == ImportKind::Named));
        let span = imports[0].names[1].span.clone();
        assert_eq!(&script[span], "isActive");
    }

    #[test]
    fn test_default_namespace_and_mixed_forms() {
        let script = indoc! {r#"
            import Zen from "zenith"
            import * as reactivity from 'zenith/reactivity'
            import Image, { Image as Picture } from 'zenith:image'
        "#};
        let imports = parse_imports(script);
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].names[0].kind, ImportKind::Default);
        assert_eq!(imports[1].names[0].kind, ImportKind::Namespace);
        assert_eq!(imports[1].names[0].local, "reactivity");
        assert_eq!(imports[1].line, 1);
        assert_eq!(names(&imports[2]), vec![("Image", "Image"), ("Image", "Picture")]);
        assert_eq!(imports[2].names[1].kind, ImportKind::Named);
    }

    #[test]
    fn test_multiline_and_type_only() {
        let script = indoc! {r#"
            import type { Route } from 'zenith/router'
            import {
              signal,
              computed,
            } from 'zenith/reactivity'
        "#};
        let imports = parse_imports(script);
        assert!(imports[0].type_only);
        assert!(!imports[1].type_only);
        assert_eq!(names(&imports[1]), vec![("signal", "signal"), ("computed", "computed")]);
    }

    #[test]
    fn test_inline_type_modifier() {
        let imports = parse_imports("import { type Route, navigate } from 'zenith/router'");
        assert_eq!(names(&imports[0]), vec![("Route", "Route"), ("navigate", "navigate")]);
    }

    #[test]
    fn test_side_effect_and_foreign_imports() {
        let script = indoc! {r#"
            import 'zenith:content'
            import lodash from 'lodash'
            import { x } from './local'
            import { y } from 'zenithish'
        "#};
        let imports = parse_imports(script);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "zenith:content");
        assert!(imports[0].names.is_empty());
    }

    #[test]
    fn test_shift_moves_spans() {
        let mut import = parse_imports("import { navigate } from 'zenith/router'").remove(0);
        import.shift(10, 2);
        assert_eq!(import.names[0].span, 19..27);
        assert_eq!(import.line, 2);
    }

    #[test]
    fn test_resolution_is_total() {
        let metadata = Metadata::builtin();
        let resolver = ImportResolver::new(&metadata);

        let core = resolver.resolve("zenith/router");
        assert_eq!(core.kind, ModuleKind::Core);
        assert!(core.is_known);

        let unknown_core = resolver.resolve("zenith/unheard-of");
        assert_eq!(unknown_core.kind, ModuleKind::Core);
        assert!(unknown_core.is_known);

        let plugin = resolver.resolve("zenith:content");
        assert_eq!(plugin.kind, ModuleKind::Plugin);
        assert!(plugin.is_known);

        let unknown_plugin = resolver.resolve("zenith:missing");
        assert_eq!(unknown_plugin.kind, ModuleKind::Plugin);
        assert!(!unknown_plugin.is_known);

        for specifier in ["react", "", "./x", "zenithx"] {
            assert_eq!(resolver.resolve(specifier).kind, ModuleKind::External);
        }
    }

    #[test]
    fn test_resolve_export() {
        let metadata = Metadata::builtin();
        let resolver = ImportResolver::new(&metadata);
        assert!(resolver.resolve_export("zenith/router", "navigate").is_some());
        assert!(resolver.resolve_export("zenith/router", "nope").is_none());
        assert!(resolver.resolve_export("zenith:missing", "x").is_none());
    }

    #[test]
    fn test_find_imported_by_local_name() {
        let imports = parse_imports("import { isActive as active } from 'zenith/router'");
        let (import, name) = find_imported(&imports, "active").unwrap();
        assert_eq!(import.specifier, "zenith/router");
        assert_eq!(name.name, "isActive");
        assert!(find_imported(&imports, "isActive").is_none());
    }
}
