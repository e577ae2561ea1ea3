//! Grammar-aware analysis for the JavaScript/TypeScript family.
//!
//! This analyzer parses the source with tree-sitter and derives every metric
//! from the syntax tree instead of textual heuristics. Decision points are
//! counted with a tree-sitter query; function discovery, nesting depth,
//! dead-code marking, deep-nest recording and `any`-type detection are
//! manual tree walks.
//!
//! Parse errors never surface to the caller: an unparseable input yields the
//! minimal result, and a tree containing ERROR nodes is walked as-is, so
//! malformed regions simply contribute nothing.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language as Grammar, Node, Parser, Query, QueryCursor, Tree};

use crate::language::Language;
use crate::metrics::{bounded_lines, CodeStructure, FunctionInfo, ANONYMOUS_NAME};

/// Block depth beyond which statements are recorded as deeply nested.
const DEEP_BLOCK_DEPTH: u32 = 4;

/// Tree-sitter query for counting decision points.
///
/// One match per: if, for, for-in/for-of, while, do-while, case clause,
/// catch clause, ternary, `&&`, `||`, `??`. The `switch` statement itself is
/// not a decision point; its case clauses are.
const COMPLEXITY_QUERY: &str = r#"
(if_statement) @branch
(for_statement) @branch
(for_in_statement) @branch
(while_statement) @branch
(do_statement) @branch
(switch_case) @branch
(catch_clause) @branch
(ternary_expression) @branch
(binary_expression operator: "&&") @branch
(binary_expression operator: "||") @branch
(binary_expression operator: "??") @branch
"#;

static TYPESCRIPT_GRAMMAR: Lazy<Grammar> =
    Lazy::new(|| tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into());
static JAVASCRIPT_GRAMMAR: Lazy<Grammar> = Lazy::new(|| tree_sitter_javascript::LANGUAGE.into());

/// Compiled once per grammar. A query that fails to compile degrades
/// complexity to the base value instead of failing analysis.
static TYPESCRIPT_COMPLEXITY: Lazy<Option<Query>> =
    Lazy::new(|| Query::new(&TYPESCRIPT_GRAMMAR, COMPLEXITY_QUERY).ok());
static JAVASCRIPT_COMPLEXITY: Lazy<Option<Query>> =
    Lazy::new(|| Query::new(&JAVASCRIPT_GRAMMAR, COMPLEXITY_QUERY).ok());

/// Grammar-aware analyzer for one JS/TS dialect.
pub struct AstAnalyzer {
    language: Language,
    grammar: &'static Grammar,
    complexity_query: &'static Option<Query>,
}

impl AstAnalyzer {
    /// Analyzer for TypeScript (type-annotated dialect).
    pub fn typescript() -> Self {
        Self {
            language: Language::TypeScript,
            grammar: &TYPESCRIPT_GRAMMAR,
            complexity_query: &TYPESCRIPT_COMPLEXITY,
        }
    }

    /// Analyzer for plain JavaScript.
    pub fn javascript() -> Self {
        Self {
            language: Language::JavaScript,
            grammar: &JAVASCRIPT_GRAMMAR,
            complexity_query: &JAVASCRIPT_COMPLEXITY,
        }
    }

    /// Analyze one source file. Total: never panics, never errors.
    pub fn analyze(&self, source: &str) -> CodeStructure {
        let total_lines = source.lines().count();
        let mut structure = CodeStructure::empty(self.language, total_lines);

        let tree = match self.parse(source) {
            Ok(tree) => tree,
            Err(_) => return structure,
        };

        let bytes = source.as_bytes();
        let mut scan = FileScan::default();
        scan_tree(tree.root_node(), bytes, 0, &mut scan);

        scan.functions.sort_by_key(|n| n.start_byte());
        structure.functions = scan
            .functions
            .iter()
            .map(|&node| self.function_info(node, bytes))
            .collect();

        structure.dead_code_lines = bounded_lines(scan.dead, total_lines);
        structure.deep_nest_lines = bounded_lines(scan.deep, total_lines);
        structure.type_any_lines = bounded_lines(scan.any_types, total_lines);
        structure.roll_up();
        structure
    }

    fn parse(&self, source: &str) -> anyhow::Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(self.grammar)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("parser produced no tree"))
    }

    fn function_info(&self, node: Node, source: &[u8]) -> FunctionInfo {
        let start_line = node.start_position().row + 1;
        let end_line = node.end_position().row + 1;
        let name = self
            .function_name(node, source)
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());

        FunctionInfo {
            name,
            start_line,
            end_line,
            line_count: end_line - start_line + 1,
            parameter_count: count_parameters(node),
            cyclomatic_complexity: self.complexity(node, source),
            max_nesting_depth: subtree_nesting(node, 0),
        }
    }

    /// Declared name, or the binding the function is assigned to, or nothing.
    fn function_name(&self, node: Node, source: &[u8]) -> Option<String> {
        if let Some(name) = node.child_by_field_name("name") {
            return node_text(name, source);
        }

        let parent = node.parent()?;
        match parent.kind() {
            "variable_declarator" => parent
                .child_by_field_name("name")
                .and_then(|n| node_text(n, source)),
            "pair" => parent
                .child_by_field_name("key")
                .and_then(|n| node_text(n, source))
                .map(|key| key.trim_matches(|c| c == '"' || c == '\'').to_string()),
            "assignment_expression" => parent
                .child_by_field_name("left")
                .and_then(|n| node_text(n, source)),
            "field_definition" | "public_field_definition" => parent
                .child_by_field_name("name")
                .or_else(|| parent.child_by_field_name("property"))
                .and_then(|n| node_text(n, source)),
            _ => None,
        }
    }

    /// Base 1 plus one per decision point anywhere in the function's subtree,
    /// nested functions included.
    fn complexity(&self, node: Node, source: &[u8]) -> u32 {
        let query = match self.complexity_query.as_ref() {
            Some(query) => query,
            None => return 1,
        };

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, node, source);
        let mut complexity = 1u32;
        while matches.next().is_some() {
            complexity += 1;
        }
        complexity
    }
}

/// Everything collected in the single file-wide walk.
#[derive(Default)]
struct FileScan<'tree> {
    functions: Vec<Node<'tree>>,
    dead: BTreeSet<usize>,
    deep: BTreeSet<usize>,
    any_types: BTreeSet<usize>,
}

fn node_text(node: Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(|s| s.to_string())
}

fn is_function_node(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
    )
}

/// Constructs that open a brace-delimited statement scope.
fn is_block_node(kind: &str) -> bool {
    matches!(kind, "statement_block" | "switch_body")
}

/// Containers whose children are sequential sibling statements.
fn is_statement_container(kind: &str) -> bool {
    matches!(kind, "statement_block" | "switch_case" | "switch_default")
}

fn is_terminal_statement(kind: &str) -> bool {
    matches!(
        kind,
        "return_statement" | "throw_statement" | "break_statement" | "continue_statement"
    )
}

/// Constructs that deepen nesting from the enclosing function's perspective.
/// Named function declarations are excluded: they are analyzed independently.
fn is_nesting_node(kind: &str) -> bool {
    matches!(
        kind,
        "if_statement"
            | "for_statement"
            | "for_in_statement"
            | "while_statement"
            | "do_statement"
            | "switch_statement"
            | "try_statement"
            | "arrow_function"
            | "function_expression"
            | "function"
            | "generator_function"
    )
}

/// One pre-order pass: function nodes, dead statements, deep-nest lines and
/// weak-type usages.
fn scan_tree<'tree>(node: Node<'tree>, source: &[u8], depth: u32, scan: &mut FileScan<'tree>) {
    let kind = node.kind();

    if is_function_node(kind) {
        scan.functions.push(node);
    }

    if kind == "predefined_type" && node.utf8_text(source) == Ok("any") {
        scan.any_types.insert(node.start_position().row + 1);
    }

    let mut depth = depth;
    if is_block_node(kind) {
        depth += 1;
        if depth > DEEP_BLOCK_DEPTH {
            let block_row = node.start_position().row;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() != "comment" && child.start_position().row != block_row {
                    scan.deep.insert(child.start_position().row + 1);
                }
            }
        }
    }

    if is_statement_container(kind) {
        mark_dead_statements(node, scan);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        scan_tree(child, source, depth, scan);
    }
}

/// Flag every sibling statement that follows a terminal statement in the
/// same container. Local per-block heuristic, not reachability analysis.
fn mark_dead_statements(block: Node, scan: &mut FileScan) {
    let mut terminated = false;
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        if terminated {
            scan.dead.insert(child.start_position().row + 1);
        } else if is_terminal_statement(child.kind()) {
            terminated = true;
        }
    }
}

/// Maximum nesting depth reached anywhere below `node`. Depth does not reset
/// inside nested functions; declarations do not increment it, expressions and
/// arrows do.
fn subtree_nesting(node: Node, depth: u32) -> u32 {
    let mut max = depth;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let child_depth = if is_nesting_node(child.kind()) {
            depth + 1
        } else {
            depth
        };
        max = max.max(subtree_nesting(child, child_depth));
    }
    max
}

fn count_parameters(node: Node) -> usize {
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        return params
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .count();
    }
    // Single-parameter arrow function without parentheses: `x => x + 1`.
    if node.child_by_field_name("parameter").is_some() {
        1
    } else {
        0
    }
}
