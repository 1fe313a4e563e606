//! docsmith - Per-File Workspace Documentation
//!
//! Scans a workspace, pulls line-level structure hints and dependency names out
//! of every source file, asks an LLM for a short analysis, and writes one
//! markdown page per file into a mirrored `documentations/` tree.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docsmith::{Config, DocGenerator, DisabledSummarizer, ProgressTracker};
//!
//! let config = Config::default();
//! let generator = DocGenerator::new(".", &config, Arc::new(DisabledSummarizer));
//! let report = generator.run(&ProgressTracker::new()).await?;
//! println!("{} pages written", report.documented);
//! ```
//!
//! The analyzers are plain functions and need no runtime:
//!
//! ```
//! let report = docsmith::analyze_structure("export function main() {}");
//! assert_eq!(report.exports.len(), 1);
//! assert_eq!(report.functions.len(), 1);
//!
//! let deps = docsmith::extract_dependencies("const fs = require('fs');");
//! assert!(deps.contains("fs"));
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: structure/dependency heuristics and workspace scanning
//! - [`ai`]: LLM providers and the summarizer boundary
//! - [`docs`]: markdown rendering and the generation loop
//! - [`config`]: layered configuration
//! - [`cli`]: command handlers, progress and console output

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod docs;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{DocsmithError, ErrorCategory, LlmError, Result};

// Analyzers
pub use analyzer::{
    DependencyExtractor, DependencySet, StructureCategory, StructureExtractor, StructureReport,
    analyze_structure, extract_dependencies, scanner::FileScanner,
};

// Summaries
pub use ai::{DisabledSummarizer, LlmProvider, LlmSummarizer, Summarizer, create_provider};

// Generation
pub use cli::progress::ProgressTracker;
pub use docs::{DocGenerator, GenerationReport};
