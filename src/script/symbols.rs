//! Declared state and function symbols of a script block
//!
//! Single-pass pattern scanning, not tokenization. Initializers and parameter
//! lists are captured as raw text and end at the first `;`, newline or `)`;
//! nested braces and parens are not balanced, so complex initializers are
//! truncated.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// `state name = initializer`, ended by `;` or newline
static STATE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[;{}\s])state[ \t]+([A-Za-z_$][\w$]*)[ \t]*=([^=>;\n][^;\n]*)?(?:;|$)")
        .expect("state declaration pattern")
});

/// `[async] function name(params)`
static FUNCTION_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w$.])(async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*\(([^)]*)\)")
        .expect("function declaration pattern")
});

/// `const name = [async] (params) =>` and `const name = [async] param =>`
static ARROW_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^\w$.])(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=;\n]+)?=\s*(async\s+)?(?:\(([^)]*)\)|([A-Za-z_$][\w$]*))\s*(?::[^=;\n]+)?=>",
    )
    .expect("arrow binding pattern")
});

/// Declared reactive state, in first-declaration order. A later declaration of
/// the same name replaces the earlier initializer.
pub type StateTable = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub name: String,
    /// Raw parameter list without the surrounding parens
    pub params: String,
    pub is_async: bool,
}

impl FunctionSymbol {
    pub fn signature(&self) -> String {
        let prefix = if self.is_async { "async " } else { "" };
        format!("{}function {}({})", prefix, self.name, self.params)
    }
}

pub fn extract_state(script: &str) -> StateTable {
    let mut state = StateTable::new();
    let mut at = 0;
    while let Some(captures) = STATE_DECLARATION.captures_at(script, at) {
        let name = captures[1].to_string();
        let initializer = captures.get(2).map_or("", |m| m.as_str()).trim().to_string();
        state.insert(name, initializer);

        // A consumed `;` also opens the next declaration
        let whole = captures.get(0).map_or(script.len(), |m| m.end());
        at = if script[..whole].ends_with(';') { whole - 1 } else { whole };
        if at >= script.len() {
            break;
        }
    }
    state
}

pub fn extract_functions(script: &str) -> Vec<FunctionSymbol> {
    let mut found: Vec<(usize, FunctionSymbol)> = Vec::new();

    for captures in FUNCTION_DECLARATION.captures_iter(script) {
        let start = captures.get(2).map_or(0, |m| m.start());
        found.push((
            start,
            FunctionSymbol {
                name: captures[2].to_string(),
                params: captures[3].trim().to_string(),
                is_async: captures.get(1).is_some(),
            },
        ));
    }

    for captures in ARROW_BINDING.captures_iter(script) {
        let start = captures.get(1).map_or(0, |m| m.start());
        let params = captures
            .get(3)
            .or_else(|| captures.get(4))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        found.push((
            start,
            FunctionSymbol {
                name: captures[1].to_string(),
                params,
                is_async: captures.get(2).is_some(),
            },
        ));
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, symbol)| symbol).collect()
}
