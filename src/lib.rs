//! Codeshape - structural source metrics.
//!
//! Codeshape extracts structural metrics from a single source file:
//! per-function cyclomatic complexity, maximum nesting depth, function
//! boundaries, length and parameter counts, plus file-wide dead-code,
//! deep-nesting and weak-typing line flags. It is the analytical core of a
//! larger code-review pipeline; rule evaluation, report formatting and file
//! discovery live in the callers.
//!
//! # Architecture
//!
//! - `language`: classifies free-form identifiers into the supported set
//! - `ast`: grammar-aware analysis for JavaScript/TypeScript (tree-sitter)
//! - `heuristic`: regex-driven scope tracking for Python, Rust, Go, Java, C#
//! - `metrics`: the shared result shape and the file-level aggregator
//! - `analyze`: the unified entry point dispatching on the classified family
//!
//! # Usage
//!
//! ```
//! let result = codeshape::analyze("func f(a int) int {\n\treturn a\n}\n", "go");
//! assert_eq!(result.functions[0].name, "f");
//! ```
//!
//! Analysis is synchronous, stateless across calls and total: every input,
//! including malformed or binary-looking text, produces a result. The only
//! shared state is the immutable pattern tables, initialized once and safe
//! to use from concurrent threads without locking.

pub mod analyze;
pub mod ast;
pub mod heuristic;
pub mod language;
pub mod metrics;

pub use analyze::analyze;
pub use ast::AstAnalyzer;
pub use heuristic::Profile;
pub use language::{classify, Language};
pub use metrics::{aggregate, CodeStructure, FunctionInfo, ANONYMOUS_NAME};
