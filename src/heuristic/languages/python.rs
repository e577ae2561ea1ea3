//! Python structural patterns.

use regex::Regex;

use crate::heuristic::Profile;
use crate::language::Language;

/// `def`/`async def` at any indentation. The `indent` capture anchors the
/// body scan; `params` stops at the closing parenthesis or end of line.
const FUNCTION_SIGNATURE: &str =
    r"^(?P<indent>[ \t]*)(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)\s*\((?P<params>[^)]*)";

/// Decision points: branches, loops, exception arms, boolean operators and
/// `match` case arms.
const DECISION_POINTS: &str = r"\b(?:if|elif|for|while|except|and|or|case)\b";

/// Statements after which the rest of the scope cannot execute.
const TERMINAL_STATEMENTS: &str =
    r"^(?:return\b|raise\b|break\b|continue\b|sys\.exit\(|os\._exit\()";

/// `typing.Any` annotations defeat type checking.
const WEAK_TYPING: &str = r"\bAny\b";

pub(super) fn profile() -> Profile {
    Profile {
        language: Language::Python,
        function_signature: Regex::new(FUNCTION_SIGNATURE).unwrap(),
        decision_points: Regex::new(DECISION_POINTS).unwrap(),
        terminal_statements: Regex::new(TERMINAL_STATEMENTS).unwrap(),
        weak_typing: Some(Regex::new(WEAK_TYPING).unwrap()),
        comment_prefixes: &["#"],
        reserved_names: &[],
    }
}
