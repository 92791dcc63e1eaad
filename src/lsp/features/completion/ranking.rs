//! Ranking and sorting of completion results
//!
//! Suggestions are ordered by tier, then by case-insensitive label. A label
//! offered by several sources is kept once, from its lowest tier.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::suggestion::Suggestion;

/// Relevance tier of a suggestion source; lower ranks first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// State, functions and properties declared by the user
    Declared = 0,
    /// Hooks, directives, project components and imported names
    Framework = 1,
    /// HTML elements
    Markup = 2,
    /// Generic attributes and events
    Attributes = 3,
}

impl Tier {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Byte-wise order of the key matches [`rank_suggestions`]; clients break
/// ties between case variants on the label itself
pub fn sort_key(tier: Tier, label: &str) -> String {
    format!("{}_{}", tier.rank(), label.to_lowercase())
}

/// Case-insensitive starts-with; an empty prefix matches everything
pub fn matches_prefix(candidate: &str, prefix: &str) -> bool {
    prefix.is_empty() || candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn compare(a: &Suggestion, b: &Suggestion) -> Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.label.cmp(&b.label))
}

/// Sorts suggestions and drops repeated labels, keeping the best tier
pub fn rank_suggestions(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by(compare);
    let mut seen = HashSet::new();
    suggestions.retain(|s| seen.insert(s.label.clone()));
    suggestions
}
