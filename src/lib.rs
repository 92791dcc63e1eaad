pub mod config;
pub mod error;
pub mod language_regions;
pub mod logging;
pub mod lsp;
pub mod metadata;
pub mod project;
pub mod script;
pub mod validators;
