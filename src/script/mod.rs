//! Script block analysis: declared symbols and framework imports

pub mod imports;
pub mod symbols;

pub use imports::{
    CORE_MODULE, ImportKind, ImportResolver, ImportedName, ModuleKind, PLUGIN_PREFIX, ParsedImport,
    ResolvedModule, find_imported, is_framework_specifier, parse_imports,
};
pub use symbols::{FunctionSymbol, StateTable, extract_functions, extract_state};

use crate::language_regions::{EmbeddedBlock, script_block};

/// Everything extracted from the script block of one document snapshot.
///
/// Import spans and lines are document-relative. A document without a script
/// block yields an empty summary.
#[derive(Debug, Clone, Default)]
pub struct ScriptSummary {
    pub block: Option<EmbeddedBlock>,
    pub state: StateTable,
    pub functions: Vec<FunctionSymbol>,
    pub imports: Vec<ParsedImport>,
}

impl ScriptSummary {
    pub fn from_document(text: &str) -> Self {
        let Some(block) = script_block(text) else {
            return Self::default();
        };
        let script = block.content(text);
        let base_line = text[..block.content.start].matches('\n').count();

        let mut imports = parse_imports(script);
        for import in &mut imports {
            import.shift(block.content.start, base_line);
        }

        Self {
            state: extract_state(script),
            functions: extract_functions(script),
            imports,
            block: Some(block),
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Whether any framework import pulls from `specifier`
    pub fn imports_module(&self, specifier: &str) -> bool {
        self.imports.iter().any(|import| import.specifier == specifier)
    }
}
