//! Rust structural patterns.

use regex::Regex;

use crate::heuristic::Profile;
use crate::language::Language;

/// `fn` items with any combination of visibility and qualifiers. Generic
/// parameter lists are skipped so `params` starts after the real paren.
const FUNCTION_SIGNATURE: &str = r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+(?P<name>[A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*\((?P<params>[^)]*)"#;

/// Decision points: branches, loops, `match`, and boolean operators.
const DECISION_POINTS: &str = r"\b(?:if|while|for|loop|match)\b|&&|\|\|";

/// Statements and diverging macros after which the scope cannot continue.
const TERMINAL_STATEMENTS: &str =
    r"^(?:return\b|break\b|continue\b|panic!\(|unreachable!\(|std::process::exit\(|process::exit\()";

/// `unsafe` blocks and raw-pointer casts sidestep the type system.
const WEAK_TYPING: &str = r"\bunsafe\b|\bas\s+\*(?:const|mut)\b";

pub(super) fn profile() -> Profile {
    Profile {
        language: Language::Rust,
        function_signature: Regex::new(FUNCTION_SIGNATURE).unwrap(),
        decision_points: Regex::new(DECISION_POINTS).unwrap(),
        terminal_statements: Regex::new(TERMINAL_STATEMENTS).unwrap(),
        weak_typing: Some(Regex::new(WEAK_TYPING).unwrap()),
        comment_prefixes: &["//", "/*"],
        reserved_names: &[],
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
            .captures("pub async fn run(&self, job: Job) -> Result<()> {")
            .unwrap();
        assert_eq!(&caps["name"], "run");
        assert_eq!(&caps["params"], "&self, job: Job");

        let caps = profile
            .function_signature
            .captures("    fn parse<'a>(input: &'a str) -> Token<'a> {")
            .unwrap();
        assert_eq!(&caps["name"], "parse");
        assert_eq!(&caps["params"], "input: &'a str");
    }

    #[test]
    fn test_signature_rejects_non_items() {
        let profile = profile();
        assert!(profile.function_signature.captures("let f = |x| x + 1;").is_none());
        assert!(profile.function_signature.captures("if fn_ptr(x) {").is_none());
    }

    #[test]
    fn test_decision_points() {
        let profile = profile();
        let count = profile
            .decision_points
            .find_iter("if a && b || matches(x) {")
            .count();
        // `matches(` does not hit the `match` keyword thanks to the word
        // boundary, so: if, &&, ||.
        assert_eq!(count, 3);
    }

    #[test]
    fn test_weak_typing() {
        let profile = profile();
        let pattern = profile.weak_typing.as_ref().unwrap();
        assert!(pattern.is_match("unsafe { *ptr }"));
        assert!(pattern.is_match("let p = addr as *const u8;"));
        assert!(!pattern.is_match("let safe_count = 1;"));
    }
}
