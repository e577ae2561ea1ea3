//! Language classification.
//!
//! Maps free-form language identifiers ("ts", "TypeScript", "py", ...) onto
//! the closed set of families the analyzers know how to handle. Unrecognized
//! identifiers classify as `Unknown` and are never an error.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Supported language families.
///
/// JavaScript and TypeScript route to the grammar-aware analyzer; Python,
/// Rust, Go, Java and C# route to the heuristic analyzer. `Unknown` yields
/// the minimal degraded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Go,
    Java,
    CSharp,
    Unknown,
}

/// Alias table, keyed by lowercased identifier.
static ALIASES: phf::Map<&'static str, Language> = phf_map! {
    "javascript" => Language::JavaScript,
    "js" => Language::JavaScript,
    "jsx" => Language::JavaScript,
    "mjs" => Language::JavaScript,
    "cjs" => Language::JavaScript,
    "node" => Language::JavaScript,
    "ecmascript" => Language::JavaScript,
    "typescript" => Language::TypeScript,
    "ts" => Language::TypeScript,
    "tsx" => Language::TypeScript,
    "mts" => Language::TypeScript,
    "cts" => Language::TypeScript,
    "python" => Language::Python,
    "python2" => Language::Python,
    "python3" => Language::Python,
    "py" => Language::Python,
    "py3" => Language::Python,
    "rust" => Language::Rust,
    "rs" => Language::Rust,
    "go" => Language::Go,
    "golang" => Language::Go,
    "java" => Language::Java,
    "csharp" => Language::CSharp,
    "c#" => Language::CSharp,
    "cs" => Language::CSharp,
    "dotnet" => Language::CSharp,
};

/// Classify a free-form language identifier.
///
/// Case-insensitive and whitespace-tolerant. Anything that does not match a
/// known alias maps to `Language::Unknown`.
pub fn classify(identifier: &str) -> Language {
    let key = identifier.trim().to_lowercase();
    ALIASES.get(key.as_str()).copied().unwrap_or(Language::Unknown)
}

impl Language {
    /// Stable lowercase name of the family.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Unknown => "unknown",
        }
    }

    /// Whether this family is analyzed by indentation rather than braces.
    pub fn is_indentation_delimited(&self) -> bool {
        matches!(self, Language::Python)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match classify(s) {
            Language::Unknown => Err(format!("unknown language: {}", s)),
            lang => Ok(lang),
        }
    }
}
