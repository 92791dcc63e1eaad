//! Framework import checks

use crate::metadata::Metadata;
use crate::script::{ImportKind, ImportResolver, ModuleKind, ScriptSummary};

use super::Finding;

pub const UNKNOWN_PLUGIN: &str = "unknown-plugin";
pub const UNKNOWN_EXPORT: &str = "unknown-export";

/// Unknown plugins are informational only; they may be installed but not
/// described by the metadata. Named imports from a described module must
/// exist in its export list. Type-only imports are not checked.
pub fn check(summary: &ScriptSummary, metadata: &Metadata) -> Vec<Finding> {
    let resolver = ImportResolver::new(metadata);
    let mut findings = Vec::new();

    for import in &summary.imports {
        let module = resolver.resolve(&import.specifier);

        if module.kind == ModuleKind::Plugin && !module.is_known {
            findings.push(Finding::information(
                import.specifier_span.clone(),
                UNKNOWN_PLUGIN,
                format!("Plugin `{}` is not registered; its exports are not checked", import.specifier),
            ));
            continue;
        }

        let Some(described) = module.metadata else {
            continue;
        };
        if import.type_only {
            continue;
        }
        for name in import.names.iter().filter(|n| n.kind == ImportKind::Named) {
            if described.export(&name.name).is_none() {
                findings.push(Finding::warning(
                    name.span.clone(),
                    UNKNOWN_EXPORT,
                    format!("`{}` is not exported by `{}`", name.name, import.specifier),
                ));
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::Severity;

    fn findings(script: &str) -> Vec<Finding> {
        let doc = format!("<script>\n{}\n</script>", script);
        check(&ScriptSummary::from_document(&doc), &Metadata::builtin())
    }

    #[test]
    fn test_unknown_plugin_is_information() {
        let found = findings("import { x } from 'zenith:nope'\nimport 'zenith:other'");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.severity == Severity::Information));
    }

    #[test]
    fn test_missing_named_export_is_warning() {
        let found = findings("import { navigate, teleport } from 'zenith/router'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
        assert!(found[0].message.contains("teleport"));
    }

    #[test]
    fn test_skipped_imports() {
        assert!(findings("import type { Missing } from 'zenith/router'").is_empty());
        assert!(findings("import Router from 'zenith/router'").is_empty());
        assert!(findings("import { anything } from 'zenith/experimental'").is_empty());
        assert!(findings("import { x } from 'other-lib'").is_empty());
    }
}
