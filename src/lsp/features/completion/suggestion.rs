//! Completion suggestions and their protocol form

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind,
};

use super::ranking::{Tier, sort_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    State,
    Function,
    Property,
    Hook,
    Directive,
    Component,
    Import,
    TypeName,
    Element,
    Attribute,
    Event,
}

impl SuggestionKind {
    pub fn completion_kind(self) -> CompletionItemKind {
        match self {
            SuggestionKind::State => CompletionItemKind::VARIABLE,
            SuggestionKind::Function | SuggestionKind::Hook => CompletionItemKind::FUNCTION,
            SuggestionKind::Property | SuggestionKind::Attribute => CompletionItemKind::PROPERTY,
            SuggestionKind::Directive | SuggestionKind::Element => CompletionItemKind::KEYWORD,
            SuggestionKind::Component => CompletionItemKind::CLASS,
            SuggestionKind::Import => CompletionItemKind::MODULE,
            SuggestionKind::TypeName => CompletionItemKind::INTERFACE,
            SuggestionKind::Event => CompletionItemKind::EVENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    pub tier: Tier,
    pub detail: Option<String>,
    /// Markdown
    pub documentation: Option<String>,
    /// Snippet with `$1`/`$0` placeholders
    pub insert_text: Option<String>,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, kind: SuggestionKind, tier: Tier) -> Self {
        Self {
            label: label.into(),
            kind,
            tier,
            detail: None,
            documentation: None,
            insert_text: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        let documentation = documentation.into();
        if !documentation.is_empty() {
            self.documentation = Some(documentation);
        }
        self
    }

    pub fn with_snippet(mut self, snippet: Option<impl Into<String>>) -> Self {
        self.insert_text = snippet.map(Into::into);
        self
    }

    /// `"{tier}_{lowercase label}"`
    pub fn sort_text(&self) -> String {
        sort_key(self.tier, &self.label)
    }

    pub fn to_completion_item(&self) -> CompletionItem {
        CompletionItem {
            label: self.label.clone(),
            kind: Some(self.kind.completion_kind()),
            detail: self.detail.clone(),
            documentation: self.documentation.as_ref().map(|value| {
                Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: value.clone(),
                })
            }),
            sort_text: Some(self.sort_text()),
            insert_text: self.insert_text.clone(),
            insert_text_format: self.insert_text.as_ref().map(|_| InsertTextFormat::SNIPPET),
            ..Default::default()
        }
    }
}
