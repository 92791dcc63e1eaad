//! Context-aware completion for `.zen` documents
//!
//! This module provides:
//! - Context detection on top of the region classifier
//! - Tiered suggestion sources (declared symbols, framework, markup, attributes)
//! - Deterministic ranking with label de-duplication
//! - Conversion to protocol `CompletionItem`s

pub mod context;
pub mod ranking;
pub mod suggestion;
pub mod synthesizer;

pub use context::{CompletionContext, CompletionContextType, determine_context};
pub use ranking::{Tier, matches_prefix, rank_suggestions, sort_key};
pub use suggestion::{Suggestion, SuggestionKind};
pub use synthesizer::complete;
