//! Static language metadata
//!
//! Directives, hooks, module registries and markup vocabulary are plain data.
//! The server loads them once at startup (the built-in tables, or a JSON file
//! supplied on the command line) and hands an `Arc<Metadata>` to every feature,
//! so tests can substitute small fixtures.

mod builtin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZenithError};

/// Prefix shared by every template directive (`zen:if`, `zen:for`, ...)
pub const DIRECTIVE_PREFIX: &str = "zen:";

/// The iteration directive, whose value must read `item[, index] in source`
pub const ITERATION_DIRECTIVE: &str = "zen:for";

/// Slot outlet element; it accepts no directives
pub const SLOT_ELEMENT: &str = "slot";

/// Built-in navigation link component and the module exporting it
pub const NAVIGATION_LINK: &str = "ZenLink";
pub const ROUTER_MODULE: &str = "zenith/router";

/// Which hosts a directive may be placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveHosts {
    #[serde(default = "default_true")]
    pub element: bool,
    #[serde(default)]
    pub component: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DirectiveHosts {
    fn default() -> Self {
        Self { element: true, component: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveMetadata {
    pub name: String,
    pub description: String,
    /// Snippet inserted on completion, e.g. `zen:if="$1"`
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub hosts: DirectiveHosts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMetadata {
    pub name: String,
    pub signature: String,
    pub description: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Component,
    Type,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub name: String,
    pub kind: ExportKind,
    #[serde(default)]
    pub signature: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub specifier: String,
    pub description: String,
    #[serde(default)]
    pub exports: Vec<ExportMetadata>,
}

impl ModuleMetadata {
    pub fn export(&self, name: &str) -> Option<&ExportMetadata> {
        self.exports.iter().find(|export| export.name == name)
    }
}

/// A named entry of a generic vocabulary (HTML elements, attributes, events)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Immutable metadata tables consumed by completion, hover and diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub directives: Vec<DirectiveMetadata>,
    pub lifecycle_hooks: Vec<HookMetadata>,
    pub navigation_hooks: Vec<HookMetadata>,
    pub core_modules: Vec<ModuleMetadata>,
    pub plugin_modules: Vec<ModuleMetadata>,
    pub html_elements: Vec<VocabularyEntry>,
    pub attributes: Vec<VocabularyEntry>,
    /// Event names without the `on` prefix (`click`, `input`, ...)
    pub events: Vec<VocabularyEntry>,
}

impl Metadata {
    /// The tables compiled into the server
    pub fn builtin() -> Self {
        builtin::tables()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ZenithError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveMetadata> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn lifecycle_hook(&self, name: &str) -> Option<&HookMetadata> {
        self.lifecycle_hooks.iter().find(|h| h.name == name)
    }

    pub fn navigation_hook(&self, name: &str) -> Option<&HookMetadata> {
        self.navigation_hooks.iter().find(|h| h.name == name)
    }

    pub fn core_module(&self, specifier: &str) -> Option<&ModuleMetadata> {
        self.core_modules.iter().find(|m| m.specifier == specifier)
    }

    pub fn plugin_module(&self, specifier: &str) -> Option<&ModuleMetadata> {
        self.plugin_modules.iter().find(|m| m.specifier == specifier)
    }

    pub fn html_element(&self, name: &str) -> Option<&VocabularyEntry> {
        self.html_elements.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&VocabularyEntry> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&VocabularyEntry> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Metadata of the navigation link component, if the router module declares it
    pub fn navigation_link(&self) -> Option<&ExportMetadata> {
        self.core_module(ROUTER_MODULE)
            .and_then(|module| module.export(NAVIGATION_LINK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_populated() {
        let metadata = Metadata::builtin();
        assert!(metadata.directive(ITERATION_DIRECTIVE).is_some());
        assert!(metadata.lifecycle_hook("zenOnMount").is_some());
        assert!(metadata.navigation_hook("navigate").is_some());
        assert!(metadata.core_module("zenith").is_some());
        assert!(metadata.html_element("div").is_some());
        assert!(metadata.navigation_link().is_some());
    }

    #[test]
    fn test_partial_fixture_uses_defaults() {
        let json = r#"{
            "directives": [
                { "name": "zen:if", "description": "Conditional" }
            ]
        }"#;
        let metadata = Metadata::from_json(json).unwrap();
        let directive = metadata.directive("zen:if").unwrap();
        assert!(directive.hosts.element);
        assert!(!directive.hosts.component);
        assert!(metadata.lifecycle_hooks.is_empty());
    }

    #[test]
    fn test_invalid_json_is_a_metadata_error() {
        let err = Metadata::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ZenithError::Metadata(_)));
    }
}
