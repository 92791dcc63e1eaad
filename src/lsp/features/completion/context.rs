//! Context detection for code completion
//!
//! Maps the region classification of a cursor position onto the set of
//! suggestion sources that apply there.

use tracing::debug;

use crate::language_regions::{HostCategory, RegionContext, classify};
use crate::metadata::DIRECTIVE_PREFIX;

/// Type of completion context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContextType {
    /// Inside the `<script>` block
    Script,

    /// Inside a `{...}` expression, including braced attribute values
    Expression,

    /// Inside the value of a `zen:` directive
    DirectiveValue,

    /// Inside the value of an event-handler attribute
    EventHandlerValue,

    /// Inside any other quoted attribute value
    AttributeValue,

    /// Attribute area of an open tag
    Attribute {
        tag_name: String,
        host: HostCategory,
    },

    /// On the name of an open tag (`<Ca|`)
    TagName,

    /// Template text outside any tag
    Template,

    /// Inside the `<style>` block
    Style,
}

/// Completion context at a cursor position
#[derive(Debug, Clone)]
pub struct CompletionContext {
    pub context_type: CompletionContextType,
    pub region: RegionContext,
}

impl CompletionContext {
    /// Partial identifier with any sigil or directive prefix removed
    pub fn partial_word(&self) -> &str {
        self.region.partial_word()
    }

    pub fn sigil(&self) -> Option<char> {
        self.region.sigil()
    }

    /// Whether the partial identifier carries the `zen:` prefix
    pub fn wants_directive(&self) -> bool {
        self.region.partial.starts_with(DIRECTIVE_PREFIX)
    }
}

/// Determine the completion context at `offset`
pub fn determine_context(text: &str, offset: usize) -> CompletionContext {
    let region = classify(text, offset);

    let context_type = if region.in_script {
        CompletionContextType::Script
    } else if region.in_style {
        CompletionContextType::Style
    } else if region.is_event_handler_value() {
        CompletionContextType::EventHandlerValue
    } else if region.is_directive_value() {
        CompletionContextType::DirectiveValue
    } else if region.in_attribute_value {
        CompletionContextType::AttributeValue
    } else if region.in_tag && region.in_tag_name {
        CompletionContextType::TagName
    } else if region.in_tag && region.in_expression {
        CompletionContextType::Expression
    } else if region.in_tag {
        let tag_name = region.tag_name.clone().unwrap_or_default();
        CompletionContextType::Attribute {
            host: HostCategory::of(&tag_name),
            tag_name,
        }
    } else if region.in_expression {
        CompletionContextType::Expression
    } else {
        CompletionContextType::Template
    };

    debug!("Completion context at {}: {:?}", offset, context_type);
    CompletionContext { context_type, region }
}
