//! Code Analyzer Module
//!
//! Heuristic, language-agnostic analysis of source text:
//! - Line-based structure hints (imports, exports, functions, classes, tests, endpoints)
//! - Dependency identifiers from common declaration syntaxes
//! - Workspace scanning with extension allow-list and ignore globs

pub mod dependencies;
pub mod scanner;
pub mod structure;

pub use dependencies::{DependencyExtractor, DependencySet, extract_dependencies};
pub use structure::{StructureCategory, StructureExtractor, StructureReport, analyze_structure};
