//! Java structural patterns.

use regex::Regex;

use crate::heuristic::Profile;
use crate::language::Language;

/// Method declarations: optional modifiers, optional type parameters, a
/// return type, then the method name and parameter list. Requiring the
/// return type keeps statements and control-flow headers from matching;
/// the `ret` capture is screened against `reserved_names` to reject
/// `throw new ...(`-style lines that still fit the shape.
const FUNCTION_SIGNATURE: &str = r"^\s*(?:(?:public|private|protected|static|final|abstract|synchronized|native|strictfp|default)\s+)*(?:<[^>]*>\s+)?(?P<ret>[\w<>\[\],.?\s]+?)\s+(?P<name>[A-Za-z_$][\w$]*)\s*\((?P<params>[^)]*)";

/// Decision points: branches, loops, switch arms, catch clauses and boolean
/// operators.
const DECISION_POINTS: &str = r"\b(?:if|for|while|case|catch)\b|&&|\|\|";

/// Statements after which the rest of the scope cannot execute.
const TERMINAL_STATEMENTS: &str = r"^(?:return\b|break\b|continue\b|throw\b|System\.exit\()";

/// Raw `Object` usage erases type information.
const WEAK_TYPING: &str = r"\bObject\b";

const RESERVED_NAMES: &[&str] = &[
    "if", "else", "for", "while", "switch", "case", "catch", "try", "return", "new", "do",
    "throw", "super", "this", "assert", "synchronized",
];

pub(super) fn profile() -> Profile {
    Profile {
        language: Language::Java,
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
            .captures("    public static void main(String[] args) {")
            .unwrap();
        assert_eq!(&caps["name"], "main");
        assert_eq!(&caps["params"], "String[] args");

        let caps = profile
            .function_signature
            .captures("    private Map<String, Integer> countWords(List<String> words) {")
            .unwrap();
        assert_eq!(&caps["name"], "countWords");
    }

    #[test]
    fn test_signature_rejects_control_flow() {
        let profile = profile();
        assert!(profile.function_signature.captures("        if (ready) {").is_none());
        assert!(profile.function_signature.captures("        while (ready) {").is_none());
        assert!(profile
            .function_signature
            .captures("        foo.bar(baz);")
            .is_none());
    }

    #[test]
    fn test_throw_new_screened_by_ret_capture() {
        let profile = profile();
        let caps = profile
            .function_signature
            .captures("        throw new IllegalStateException(msg);")
            .unwrap();
        // The shape matches, but the ret capture starts with a reserved
        // keyword; the scanner rejects it.
        let first = caps["ret"].split_whitespace().next().unwrap();
        assert!(profile.reserved_names.contains(&first));
    }
}
