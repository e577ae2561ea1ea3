//! Unified analysis entry point.
//!
//! Classifies the language identifier and routes to the grammar-aware or
//! heuristic analyzer. One exhaustive match over the closed language set;
//! anything unrecognized degrades to the minimal result.

use crate::ast::AstAnalyzer;
use crate::heuristic;
use crate::language::{classify, Language};
use crate::metrics::CodeStructure;

/// Extract structural metrics from one source file.
///
/// `language` is a free-form identifier ("ts", "TypeScript", "py", ...).
/// This function is total: it never panics and never returns an error. An
/// unrecognized language yields a `CodeStructure` with no functions, base
/// complexity 1 and empty line lists; malformed source is processed
/// best-effort.
pub fn analyze(code: &str, language: &str) -> CodeStructure {
    match classify(language) {
        Language::JavaScript => AstAnalyzer::javascript().analyze(code),
        Language::TypeScript => AstAnalyzer::typescript().analyze(code),
        lang @ (Language::Python
        | Language::Rust
        | Language::Go
        | Language::Java
        | Language::CSharp) => heuristic::analyze(code, lang),
        Language::Unknown => CodeStructure::empty(Language::Unknown, code.lines().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_typescript() {
        let result = analyze("function f(): void {}", "TypeScript");
        assert_eq!(result.language, Language::TypeScript);
        assert_eq!(result.functions.len(), 1);
    }

    #[test]
    fn test_dispatch_go() {
        let result = analyze("func f() {\n}\n", "go");
        assert_eq!(result.language, Language::Go);
        assert_eq!(result.functions.len(), 1);
    }

    #[test]
    fn test_unknown_language_minimal_result() {
        let result = analyze("IDENTIFICATION DIVISION.\nPROGRAM-ID. HELLO.\n", "cobol");
        assert_eq!(result.language, Language::Unknown);
        assert_eq!(result.total_lines, 2);
        assert!(result.functions.is_empty());
        assert_eq!(result.file_cyclomatic_complexity, 1);
        assert_eq!(result.max_nesting_depth, 0);
        assert!(result.dead_code_lines.is_empty());
        assert!(result.deep_nest_lines.is_empty());
        assert!(result.type_any_lines.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let source = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        let first = analyze(source, "python");
        let second = analyze(source, "python");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let result = analyze("", "rust");
        assert_eq!(result.total_lines, 0);
        assert!(result.functions.is_empty());
        assert_eq!(result.file_cyclomatic_complexity, 1);
    }
}
