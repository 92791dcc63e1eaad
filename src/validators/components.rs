//! Unresolved component references

use crate::language_regions::Tag;
use crate::metadata::NAVIGATION_LINK;
use crate::project::ProjectGraph;
use crate::script::ScriptSummary;

use super::Finding;

pub const UNRESOLVED_COMPONENT: &str = "unresolved-component";

/// Warns on capitalized opening tags that are neither a project layout or
/// component, the navigation link, nor bound by a framework import.
pub fn check(tags: &[Tag], summary: &ScriptSummary, graph: &ProjectGraph) -> Vec<Finding> {
    tags.iter()
        .filter(|tag| tag.is_component())
        .filter(|tag| tag.name != NAVIGATION_LINK)
        .filter(|tag| !graph.is_resolvable_component(&tag.name))
        .filter(|tag| {
            !summary
                .imports
                .iter()
                .any(|import| import.names.iter().any(|name| name.local == tag.name))
        })
        .map(|tag| {
            Finding::warning(
                tag.name_span.clone(),
                UNRESOLVED_COMPONENT,
                format!(
                    "Unknown component `{}`: no layout or component with this name in the project",
                    tag.name
                ),
            )
        })
        .collect()
}
