//! Go structural patterns.

use regex::Regex;

use crate::heuristic::Profile;
use crate::language::Language;

/// `func` declarations, with optional method receiver and type parameters.
const FUNCTION_SIGNATURE: &str =
    r"^\s*func\s+(?:\([^)]*\)\s*)?(?P<name>[A-Za-z_]\w*)\s*(?:\[[^\]]*\]\s*)?\((?P<params>[^)]*)";

/// Decision points: branches, loops, switch/select arms and boolean
/// operators. `switch` itself is not counted; its cases are.
const DECISION_POINTS: &str = r"\b(?:if|for|case|select)\b|&&|\|\|";

/// Statements after which the rest of the scope cannot execute.
const TERMINAL_STATEMENTS: &str = r"^(?:return\b|break\b|continue\b|panic\(|os\.Exit\()";

/// The empty interface and its `any` alias erase type information.
const WEAK_TYPING: &str = r"interface\{\}|\bany\b";

pub(super) fn profile() -> Profile {
    Profile {
        language: Language::Go,
        function_signature: Regex::new(FUNCTION_SIGNATURE).unwrap(),
        decision_points: Regex::new(DECISION_POINTS).unwrap(),
        terminal_statements: Regex::new(TERMINAL_STATEMENTS).unwrap(),
        weak_typing: Some(Regex::new(WEAK_TYPING).unwrap()),
        comment_prefixes: &["//", "/*"],
        reserved_names: &[],
    }
}
