//! Heuristic structural analysis for languages without a bundled grammar.
//!
//! Two scanning strategies cover the supported families: brace-depth
//! tracking (Rust, Go, Java, C#) and indentation tracking (Python). Both
//! derive the same metrics as the grammar-aware analyzer from raw source
//! lines, driven by per-language pattern tables (`Profile`).
//!
//! Keywords inside string literals and multi-line constructs the patterns
//! cannot see may be miscounted; that imprecision is inherent to the
//! line-scanning approach and callers treat the output as a signal, not a
//! proof.

pub mod languages;

use std::collections::BTreeSet;

use regex::Regex;

use crate::language::Language;
use crate::metrics::{bounded_lines, CodeStructure, FunctionInfo};

/// Fixed indentation unit assumed for Python sources.
const INDENT_UNIT: usize = 4;

/// Column threshold for deep nesting in Python (five indent levels).
const DEEP_INDENT_COLUMNS: usize = 20;

/// Brace depth beyond which lines count as deeply nested.
const DEEP_BRACE_DEPTH: i32 = 5;

/// Pattern table for one language family.
///
/// Profiles are built once at first use and shared by every analysis call;
/// see `languages::profile_for`.
pub struct Profile {
    pub language: Language,
    /// Matches a function signature line. Named captures: `name`, `params`,
    /// and for indentation-delimited languages `indent`. An optional `ret`
    /// capture carries the return-type text for reserved-word screening.
    pub function_signature: Regex,
    /// One match per decision point on a line.
    pub decision_points: Regex,
    /// Matches a trimmed line that ends the enclosing scope's control flow.
    pub terminal_statements: Regex,
    /// Flags weak-typing usage; `None` when the family has no such notion.
    pub weak_typing: Option<Regex>,
    /// Prefixes that mark a comment-only line.
    pub comment_prefixes: &'static [&'static str],
    /// Identifiers that pattern-match like signatures but never are.
    pub reserved_names: &'static [&'static str],
}

/// Analyze one source file with the strategy for `language`.
///
/// A language without a registered profile degrades to the minimal result.
pub fn analyze(source: &str, language: Language) -> CodeStructure {
    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    let profile = match languages::profile_for(language) {
        Some(profile) => profile,
        None => return CodeStructure::empty(language, total_lines),
    };

    let mut structure = CodeStructure::empty(language, total_lines);
    if language.is_indentation_delimited() {
        structure.functions = extract_indent_functions(&lines, profile);
        structure.dead_code_lines =
            bounded_lines(scan_dead_code_indent(&lines, profile), total_lines);
        structure.deep_nest_lines =
            bounded_lines(scan_deep_nesting_indent(&lines, profile), total_lines);
    } else {
        structure.functions = extract_brace_functions(&lines, profile);
        structure.dead_code_lines =
            bounded_lines(scan_dead_code_braces(&lines, profile), total_lines);
        structure.deep_nest_lines =
            bounded_lines(scan_deep_nesting_braces(&lines, profile), total_lines);
    }
    structure.type_any_lines = bounded_lines(scan_weak_typing(&lines, profile), total_lines);
    structure.roll_up();
    structure
}

fn is_comment_line(line: &str, profile: &Profile) -> bool {
    let trimmed = line.trim_start();
    profile
        .comment_prefixes
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Leading whitespace width; a tab advances one indent unit.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += INDENT_UNIT,
            _ => break,
        }
    }
    width
}

/// Comma-split parameter count. For indentation-delimited languages the
/// conventional receiver tokens are dropped wherever they appear.
fn count_parameters(params: &str, drop_receiver: bool) -> usize {
    params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| {
            if !drop_receiver {
                return true;
            }
            let token = p
                .split(|c: char| c == ':' || c == '=' || c.is_whitespace())
                .next()
                .unwrap_or("");
            token != "self" && token != "cls"
        })
        .count()
}

/// Base 1 plus one per decision-point match on every non-comment line.
fn line_complexity(lines: &[&str], profile: &Profile) -> u32 {
    let mut complexity = 1u32;
    for line in lines {
        if is_comment_line(line, profile) {
            continue;
        }
        complexity += profile.decision_points.find_iter(line).count() as u32;
    }
    complexity
}

/// Maximum brace depth over the range, minus one for the function body's own
/// outermost brace.
fn brace_nesting(lines: &[&str]) -> u32 {
    let mut depth = 0i32;
    let mut max = 0i32;
    for line in lines {
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    max = max.max(depth);
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
    }
    max.saturating_sub(1).max(0) as u32
}

fn reserved_match(caps: &regex::Captures, profile: &Profile) -> bool {
    if let Some(name) = caps.name("name") {
        if profile.reserved_names.contains(&name.as_str()) {
            return true;
        }
    }
    // A "return type" that is really a statement keyword (`new Foo(`,
    // `throw new Bar(`) marks a false signature match.
    if let Some(ret) = caps.name("ret") {
        if let Some(first) = ret.as_str().split_whitespace().next() {
            if profile.reserved_names.contains(&first) {
                return true;
            }
        }
    }
    false
}

/// Brace-delimited function extraction.
///
/// A signature match opens a candidate; the body starts at the first
/// following line containing `{` and ends where the running brace depth
/// returns to zero. Scanning resumes past the end line, so constructs inside
/// a body are not re-reported. A candidate that reaches a `;` or
/// end-of-file before its opening brace is discarded.
fn extract_brace_functions(lines: &[&str], profile: &Profile) -> Vec<FunctionInfo> {
    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if is_comment_line(lines[i], profile) {
            i += 1;
            continue;
        }
        let caps = match profile.function_signature.captures(lines[i]) {
            Some(caps) => caps,
            None => {
                i += 1;
                continue;
            }
        };
        if reserved_match(&caps, profile) {
            i += 1;
            continue;
        }
        let name = caps.name("name").map(|m| m.as_str()).unwrap_or("");
        let params = caps.name("params").map(|m| m.as_str()).unwrap_or("");
        if name.is_empty() {
            i += 1;
            continue;
        }

        // The signature may spill over several lines before the body opens.
        let mut open = None;
        for (j, line) in lines.iter().enumerate().skip(i) {
            if let Some(brace_at) = line.find('{') {
                match line.find(';') {
                    Some(semi_at) if semi_at < brace_at => break,
                    _ => {
                        open = Some(j);
                    }
                }
                break;
            }
            if line.contains(';') {
                break;
            }
        }
        let open = match open {
            Some(j) => j,
            None => {
                i += 1;
                continue;
            }
        };

        let mut depth = 0i32;
        let mut end = lines.len() - 1;
        for (k, line) in lines.iter().enumerate().skip(open) {
            for c in line.chars() {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
            }
            if depth <= 0 {
                end = k;
                break;
            }
        }

        let start_line = i + 1;
        let end_line = end + 1;
        functions.push(FunctionInfo {
            name: name.to_string(),
            start_line,
            end_line,
            line_count: end_line - start_line + 1,
            parameter_count: count_parameters(params, false),
            cyclomatic_complexity: line_complexity(&lines[i..=end], profile),
            max_nesting_depth: brace_nesting(&lines[i..=end]),
        });

        i = end + 1;
    }

    functions
}

/// Indentation-delimited function extraction (Python).
///
/// The body runs until the first code line back at or below the `def` line's
/// indentation; blank and comment lines never terminate the scan. The
/// reported end line points one line past the body, clamped to the file end.
/// Nested `def`s are reported as independent entries.
fn extract_indent_functions(lines: &[&str], profile: &Profile) -> Vec<FunctionInfo> {
    let mut functions = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let caps = match profile.function_signature.captures(line) {
            Some(caps) => caps,
            None => continue,
        };
        let name = caps.name("name").map(|m| m.as_str()).unwrap_or("");
        if name.is_empty() {
            continue;
        }
        let params = caps.name("params").map(|m| m.as_str()).unwrap_or("");
        let base_indent = caps
            .name("indent")
            .map(|m| indent_width(m.as_str()))
            .unwrap_or(0);

        let mut dedent = None;
        for (j, body_line) in lines.iter().enumerate().skip(i + 1) {
            let trimmed = body_line.trim();
            if trimmed.is_empty() || is_comment_line(body_line, profile) {
                continue;
            }
            if indent_width(body_line) <= base_indent {
                dedent = Some(j);
                break;
            }
        }
        let (end_line, body_end) = match dedent {
            Some(j) => (j + 1, j.saturating_sub(1)),
            None => (lines.len(), lines.len() - 1),
        };

        let mut max_nest = 0usize;
        if body_end > i {
            for body_line in &lines[i + 1..=body_end] {
                let trimmed = body_line.trim();
                if trimmed.is_empty() || is_comment_line(body_line, profile) {
                    continue;
                }
                let depth = indent_width(body_line).saturating_sub(base_indent) / INDENT_UNIT;
                max_nest = max_nest.max(depth);
            }
        }

        functions.push(FunctionInfo {
            name: name.to_string(),
            start_line: i + 1,
            end_line,
            line_count: end_line.saturating_sub(i + 1),
            parameter_count: count_parameters(params, true),
            cyclomatic_complexity: line_complexity(&lines[i..=body_end], profile),
            max_nesting_depth: max_nest as u32,
        });
    }

    functions
}

/// File-wide dead-code scan for brace languages.
///
/// After a terminal statement, every code line at the same or deeper brace
/// depth is flagged until the enclosing scope closes; the closing-brace line
/// itself is exempt.
fn scan_dead_code_braces(lines: &[&str], profile: &Profile) -> BTreeSet<usize> {
    let mut dead = BTreeSet::new();
    let mut depth = 0i32;
    let mut unreachable_at: Option<i32> = None;

    for (idx, line) in lines.iter().enumerate() {
        let mut line_depth = depth;
        let mut min_depth = depth;
        for c in line.chars() {
            match c {
                '{' => line_depth += 1,
                '}' => {
                    line_depth -= 1;
                    min_depth = min_depth.min(line_depth);
                }
                _ => {}
            }
        }

        let trimmed = line.trim();
        match unreachable_at {
            Some(scope) if min_depth < scope => {
                unreachable_at = None;
            }
            Some(_) => {
                if !trimmed.is_empty() && !is_comment_line(line, profile) {
                    dead.insert(idx + 1);
                }
            }
            None => {
                if !is_comment_line(line, profile)
                    && profile.terminal_statements.is_match(trimmed)
                {
                    unreachable_at = Some(line_depth);
                }
            }
        }

        depth = line_depth;
    }

    dead
}

/// File-wide dead-code scan for Python.
///
/// Lines indented deeper than a terminal statement are flagged; the first
/// line back at or below the terminal's indentation resets the state without
/// being flagged.
fn scan_dead_code_indent(lines: &[&str], profile: &Profile) -> BTreeSet<usize> {
    let mut dead = BTreeSet::new();
    let mut dead_below: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment_line(line, profile) {
            continue;
        }
        let indent = indent_width(line);

        if let Some(threshold) = dead_below {
            if indent > threshold {
                dead.insert(idx + 1);
                continue;
            }
            dead_below = None;
        }
        if profile.terminal_statements.is_match(trimmed) {
            dead_below = Some(indent);
        }
    }

    dead
}

/// Flag code lines encountered while the running brace depth exceeds the
/// threshold.
fn scan_deep_nesting_braces(lines: &[&str], profile: &Profile) -> BTreeSet<usize> {
    let mut deep = BTreeSet::new();
    let mut depth = 0i32;

    for (idx, line) in lines.iter().enumerate() {
        let at_entry = depth;
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
        let trimmed = line.trim();
        if at_entry > DEEP_BRACE_DEPTH && !trimmed.is_empty() && !is_comment_line(line, profile) {
            deep.insert(idx + 1);
        }
    }

    deep
}

/// Flag Python code lines indented at or beyond the column threshold.
fn scan_deep_nesting_indent(lines: &[&str], profile: &Profile) -> BTreeSet<usize> {
    let mut deep = BTreeSet::new();

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment_line(line, profile) {
            continue;
        }
        if indent_width(line) >= DEEP_INDENT_COLUMNS {
            deep.insert(idx + 1);
        }
    }

    deep
}

/// Flag every non-comment line matching the family's weak-typing pattern.
fn scan_weak_typing(lines: &[&str], profile: &Profile) -> BTreeSet<usize> {
    let mut flagged = BTreeSet::new();
    let pattern = match &profile.weak_typing {
        Some(pattern) => pattern,
        None => return flagged,
    };

    for (idx, line) in lines.iter().enumerate() {
        if is_comment_line(line, profile) {
            continue;
        }
        if pattern.is_match(line) {
            flagged.insert(idx + 1);
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_function_extraction() {
        let source = "func sum(a int, b int) int {\n\treturn a + b\n}\n";
        let result = analyze(source, Language::Go);

        assert_eq!(result.functions.len(), 1);
        let sum = &result.functions[0];
        assert_eq!(sum.name, "sum");
        assert_eq!(sum.parameter_count, 2);
        assert_eq!(sum.cyclomatic_complexity, 1);
        assert_eq!(sum.start_line, 1);
        assert_eq!(sum.end_line, 3);
        assert_eq!(sum.line_count, 3);
    }

    #[test]
    fn test_go_complexity_counts_each_match() {
        let source = r#"
func classify(x int, y int) string {
	if x > 0 && y > 0 {
		return "both"
	}
	for i := 0; i < x; i++ {
		if i%2 == 0 || i > y {
			count++
		}
	}
	return "done"
}
"#;
        let result = analyze(source, Language::Go);
        // 1 (base) + if + && + for + if + || = 6
        assert_eq!(result.functions[0].cyclomatic_complexity, 6);
    }

    #[test]
    fn test_go_method_receiver_signature() {
        let source = "func (s *Server) Handle(w Writer, r *Request) {\n\ts.count++\n}\n";
        let result = analyze(source, Language::Go);

        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "Handle");
        assert_eq!(result.functions[0].parameter_count, 2);
    }

    #[test]
    fn test_brace_nesting_excludes_body_brace() {
        let source = r#"
func walk(rows [][]int) {
	for _, row := range rows {
		if len(row) > 0 {
			visit(row)
		}
	}
}
"#;
        let result = analyze(source, Language::Go);
        // Max depth 3 (body, for, if) minus the body's own brace.
        assert_eq!(result.functions[0].max_nesting_depth, 2);
    }

    #[test]
    fn test_multi_line_signature() {
        let source = r#"
fn configure(
    host: &str,
    port: u16,
) -> Config {
    Config::new(host, port)
}
"#;
        let result = analyze(source, Language::Rust);
        assert_eq!(result.functions.len(), 1);
        let f = &result.functions[0];
        assert_eq!(f.name, "configure");
        assert_eq!(f.start_line, 2);
        assert_eq!(f.end_line, 7);
    }

    #[test]
    fn test_trait_method_declaration_is_discarded() {
        let source = r#"
trait Store {
    fn get(&self, key: &str) -> Option<String>;
}

fn fetch(key: &str) -> String {
    lookup(key)
}
"#;
        let result = analyze(source, Language::Rust);
        let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["fetch"]);
    }

    #[test]
    fn test_nested_function_not_reported_separately() {
        let source = r#"
func outer() {
	inner := func(x int) int {
		return x * 2
	}
	inner(2)
}

func after() {
	work()
}
"#;
        let result = analyze(source, Language::Go);
        let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
        // The anonymous closure stays inside outer's body; scanning resumes
        // after outer's closing brace and still finds the next function.
        assert_eq!(names, vec!["outer", "after"]);
    }

    #[test]
    fn test_dead_code_after_return_in_block() {
        let source = r#"
func f(x int) int {
	if x > 0 {
		return 1
		log.Println("dead")
	}
	return 0
}
"#;
        let result = analyze(source, Language::Go);
        assert_eq!(result.dead_code_lines, vec![5]);
    }

    #[test]
    fn test_dead_code_closing_brace_exempt() {
        let source = "func f() int {\n\treturn 1\n}\nvar x = 1\n";
        let result = analyze(source, Language::Go);
        // Neither the closing brace nor anything past the scope is flagged.
        assert!(result.dead_code_lines.is_empty());
    }

    #[test]
    fn test_deep_nesting_braces() {
        let source = r#"
func f(a, b, c, d, e bool) {
	if a {
		if b {
			if c {
				if d {
					if e {
						work()
					}
				}
			}
		}
	}
}
"#;
        let result = analyze(source, Language::Go);
        // `work()` sits at brace depth 7; the line is deeply nested.
        assert!(result.deep_nest_lines.contains(&8));
    }

    #[test]
    fn test_python_function_extraction() {
        let source = r#"
class Parser:
    def feed(self, chunk, strict=False):
        if not chunk:
            return 0
        return len(chunk)

    def reset(self):
        self.buffer = []
"#;
        let result = analyze(source, Language::Python);
        let feed = result.find_function("feed").unwrap();
        // `self` is excluded from the count.
        assert_eq!(feed.parameter_count, 2);
        assert_eq!(feed.start_line, 3);
        // End points one line past the body (the blank-line scan stops at
        // the next def).
        assert_eq!(feed.end_line, 8);
        assert_eq!(feed.line_count, 5);
        assert_eq!(feed.cyclomatic_complexity, 2);

        assert!(result.find_function("reset").is_some());
    }

    #[test]
    fn test_python_nesting_from_indentation() {
        let source = r#"
def crunch(rows):
    for row in rows:
        if row:
            emit(row)
"#;
        let result = analyze(source, Language::Python);
        // Body at 4 -> depth 1, for-body at 8 -> 2, if-body at 12 -> 3.
        assert_eq!(result.functions[0].max_nesting_depth, 3);
    }

    #[test]
    fn test_python_dead_code_deeper_only() {
        let source = "def f(x):\n    return 1\n        print('unreachable')\n    print('sibling')\n";
        let result = analyze(source, Language::Python);
        // Only the deeper-indented line is dead; the sibling resets.
        assert_eq!(result.dead_code_lines, vec![3]);
    }

    #[test]
    fn test_python_deep_nesting_by_columns() {
        let source = "def f(a):\n    if a:\n        if a:\n            if a:\n                if a:\n                    work(a)\n";
        let result = analyze(source, Language::Python);
        // `work(a)` is indented 20 columns.
        assert_eq!(result.deep_nest_lines, vec![6]);
    }

    #[test]
    fn test_rust_unsafe_flagged_as_weak_typing() {
        let source = "fn raw(p: *const u8) -> u8 {\n    unsafe { *p }\n}\n";
        let result = analyze(source, Language::Rust);
        assert_eq!(result.type_any_lines, vec![2]);
    }

    #[test]
    fn test_go_empty_interface_flagged() {
        let source = "func dump(v interface{}) {\n\tfmt.Println(v)\n}\n";
        let result = analyze(source, Language::Go);
        assert_eq!(result.type_any_lines, vec![1]);
    }

    #[test]
    fn test_java_keywords_are_not_functions() {
        let source = r#"
public class Runner {
    public int run(int limit) {
        while (limit > 0) {
            limit--;
        }
        return limit;
    }
}
"#;
        let result = analyze(source, Language::Java);
        let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["run"]);
    }

    #[test]
    fn test_java_statement_lines_are_not_functions() {
        let source = r#"
public class T {
    public void go() {
        throw new IllegalStateException("nope");
    }
}
"#;
        let result = analyze(source, Language::Java);
        let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["go"]);
    }

    #[test]
    fn test_csharp_dynamic_flagged() {
        let source = "public void Load(dynamic payload) {\n    Apply(payload);\n}\n";
        let result = analyze(source, Language::CSharp);
        assert_eq!(result.type_any_lines, vec![1]);
    }

    #[test]
    fn test_comment_lines_do_not_count() {
        let source = r#"
fn plain() -> u32 {
    // if this comment mentioned a loop, for example, it must not count
    1
}
"#;
        let result = analyze(source, Language::Rust);
        assert_eq!(result.functions[0].cyclomatic_complexity, 1);
    }

    #[test]
    fn test_unregistered_family_degrades() {
        let result = analyze("function f() {}", Language::Unknown);
        assert!(result.functions.is_empty());
        assert_eq!(result.file_cyclomatic_complexity, 1);
    }

    #[test]
    fn test_indent_width_tabs() {
        assert_eq!(indent_width("    x"), 4);
        assert_eq!(indent_width("\tx"), 4);
        assert_eq!(indent_width("\t  x"), 6);
        assert_eq!(indent_width("x"), 0);
    }

    #[test]
    fn test_count_parameters() {
        assert_eq!(count_parameters("", false), 0);
        assert_eq!(count_parameters("a int, b int", false), 2);
        assert_eq!(count_parameters("self, chunk, strict", true), 2);
        assert_eq!(count_parameters("cls", true), 0);
        assert_eq!(count_parameters("self: Parser, data", true), 1);
    }
}
