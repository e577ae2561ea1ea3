//! Per-language pattern tables for the heuristic analyzer.
//!
//! Each module defines the regex patterns for one family and builds its
//! `Profile`. Profiles are materialized once into process-wide statics and
//! shared, read-only, by every analysis call.

mod csharp;
mod go;
mod java;
mod python;
mod rust_lang;

use lazy_static::lazy_static;

use super::Profile;
use crate::language::Language;

lazy_static! {
    static ref PYTHON_PROFILE: Profile = python::profile();
    static ref RUST_PROFILE: Profile = rust_lang::profile();
    static ref GO_PROFILE: Profile = go::profile();
    static ref JAVA_PROFILE: Profile = java::profile();
    static ref CSHARP_PROFILE: Profile = csharp::profile();
}

/// Look up the pattern table for a language family.
///
/// Returns `None` for families the heuristic analyzer does not cover
/// (the JS/TS family has a real grammar; `Unknown` has nothing).
pub fn profile_for(language: Language) -> Option<&'static Profile> {
    match language {
        Language::Python => Some(&*PYTHON_PROFILE),
        Language::Rust => Some(&*RUST_PROFILE),
        Language::Go => Some(&*GO_PROFILE),
        Language::Java => Some(&*JAVA_PROFILE),
        Language::CSharp => Some(&*CSHARP_PROFILE),
        Language::JavaScript | Language::TypeScript | Language::Unknown => None,
    }
}
