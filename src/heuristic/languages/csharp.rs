//! C# structural patterns.

use regex::Regex;

use crate::heuristic::Profile;
use crate::language::Language;

/// Method declarations: optional modifiers, a return type, then the method
/// name and parameter list. Properties have no parameter list and never
/// match; the `ret` capture is screened against `reserved_names`.
const FUNCTION_SIGNATURE: &str = r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|sealed|abstract|async|partial|extern|unsafe|new)\s+)*(?P<ret>[\w<>\[\],.?\s]+?)\s+(?P<name>[A-Za-z_]\w*)\s*\((?P<params>[^)]*)";

/// Decision points: branches, loops, switch arms, catch clauses and boolean
/// operators.
const DECISION_POINTS: &str = r"\b(?:if|for|foreach|while|case|catch)\b|&&|\|\|";

/// Statements after which the rest of the scope cannot execute.
const TERMINAL_STATEMENTS: &str =
    r"^(?:return\b|break\b|continue\b|throw\b|Environment\.Exit\()";

/// `dynamic` defers all member resolution to runtime.
const WEAK_TYPING: &str = r"\bdynamic\b";

const RESERVED_NAMES: &[&str] = &[
    "if", "else", "for", "foreach", "while", "switch", "case", "catch", "try", "return",
    "new", "do", "throw", "using", "lock", "base", "this",
];

pub(super) fn profile() -> Profile {
    Profile {
        language: Language::CSharp,
        function_signature: Regex::new(FUNCTION_SIGNATURE).unwrap(),
        decision_points: Regex::new(DECISION_POINTS).unwrap(),
        terminal_statements: Regex::new(TERMINAL_STATEMENTS).unwrap(),
        weak_typing: Some(Regex::new(WEAK_TYPING).unwrap()),
        comment_prefixes: &["//", "/*", "*"],
        reserved_names: RESERVED_NAMES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_captures() {
        let profile = profile();

        let caps = profile
            .function_signature
            .captures("    public async Task<int> LoadAsync(string path, int retries) {")
            .unwrap();
        assert_eq!(&caps["name"], "LoadAsync");
        assert_eq!(&caps["params"], "string path, int retries");
    }

    #[test]
    fn test_signature_rejects_properties_and_control_flow() {
        let profile = profile();
        assert!(profile
            .function_signature
            .captures("    public int Count { get; set; }")
            .is_none());
        assert!(profile
            .function_signature
            .captures("        foreach (var item in items) {")
            .is_none());
    }

    #[test]
    fn test_decision_points_include_foreach() {
        let profile = profile();
        let count = profile
            .decision_points
            .find_iter("foreach (var x in xs) { if (x > 0 && x < 9) {")
            .count();
        assert_eq!(count, 3);
    }
}
