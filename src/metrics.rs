//! Result structures shared by both analyzers, and the file-level aggregator.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Name reported for a function that cannot be attributed to any binding.
pub const ANONYMOUS_NAME: &str = "<anonymous>";

/// Structural metrics for one detected function or method.
///
/// Line numbers are 1-based. For brace-delimited languages `end_line` is the
/// line of the closing brace and `line_count = end_line - start_line + 1`;
/// for indentation-delimited languages `end_line` points one line past the
/// body and `line_count = end_line - start_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub line_count: usize,
    pub parameter_count: usize,
    pub cyclomatic_complexity: u32,
    pub max_nesting_depth: u32,
}

/// Aggregate structural metrics for one source file.
///
/// `dead_code_lines`, `deep_nest_lines` and `type_any_lines` are sorted and
/// duplicate-free; every line number in the result lies within
/// `[1, total_lines]`. All fields are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStructure {
    pub language: Language,
    pub total_lines: usize,
    pub functions: Vec<FunctionInfo>,
    pub file_cyclomatic_complexity: u32,
    pub max_nesting_depth: u32,
    pub dead_code_lines: Vec<usize>,
    pub deep_nest_lines: Vec<usize>,
    pub type_any_lines: Vec<usize>,
}

impl CodeStructure {
    /// The minimal result: no functions, base complexity 1, no flagged lines.
    ///
    /// Used for unrecognized languages, missing pattern tables, and total
    /// parse failures.
    pub fn empty(language: Language, total_lines: usize) -> Self {
        Self {
            language,
            total_lines,
            functions: Vec::new(),
            file_cyclomatic_complexity: 1,
            max_nesting_depth: 0,
            dead_code_lines: Vec::new(),
            deep_nest_lines: Vec::new(),
            type_any_lines: Vec::new(),
        }
    }

    /// Find a function by name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Recompute the file-level rollups from the current function list.
    pub fn roll_up(&mut self) {
        let (complexity, nesting) = aggregate(&self.functions);
        self.file_cyclomatic_complexity = complexity;
        self.max_nesting_depth = nesting;
    }
}

/// Convert a collected line set into the exposed form: sorted, duplicate-free,
/// and restricted to `[1, total_lines]`.
pub(crate) fn bounded_lines(
    lines: std::collections::BTreeSet<usize>,
    total_lines: usize,
) -> Vec<usize> {
    lines
        .into_iter()
        .filter(|&line| line >= 1 && line <= total_lines)
        .collect()
}

/// Combine per-function metrics into file-level totals.
///
/// Returns `(file_cyclomatic_complexity, max_nesting_depth)`: the sum of all
/// function complexities with a floor of 1 (a file always has at least one
/// path), and the maximum nesting depth with a floor of 0.
pub fn aggregate(functions: &[FunctionInfo]) -> (u32, u32) {
    let complexity: u32 = functions.iter().map(|f| f.cyclomatic_complexity).sum();
    let nesting = functions
        .iter()
        .map(|f| f.max_nesting_depth)
        .max()
        .unwrap_or(0);
    (complexity.max(1), nesting)
}
