//! Line-Based Structure Extractor
//!
//! Classifies lines of arbitrary source text into six categories of
//! syntactic hints: imports, exports, functions, classes, test declarations
//! and HTTP endpoint declarations.
//!
//! This is heuristic, line-local pattern matching, not parsing:
//! - No AST, no scoping, no language detection
//! - A single line may land in several categories
//! - Patterns are unanchored, so `submit(` counts as a test call site and a
//!   route string inside a comment counts as an endpoint

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Identifiers are ASCII word characters only.
static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"function\s+[A-Za-z0-9_]+\(").expect("valid function pattern")
});

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+[A-Za-z0-9_]+").expect("valid class pattern"));

static TEST_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(it|test|describe)\(").expect("valid test pattern"));

static HTTP_ROUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(GET|POST|PUT|DELETE)\s+/").expect("valid route pattern"));

/// Structure categories, in recognizer order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureCategory {
    Imports,
    Exports,
    Functions,
    Classes,
    TestCases,
    Endpoints,
}

impl StructureCategory {
    /// All categories in the fixed recognizer order
    pub const ALL: [StructureCategory; 6] = [
        StructureCategory::Imports,
        StructureCategory::Exports,
        StructureCategory::Functions,
        StructureCategory::Classes,
        StructureCategory::TestCases,
        StructureCategory::Endpoints,
    ];

    /// Heading used when rendering this category
    pub fn title(&self) -> &'static str {
        match self {
            StructureCategory::Imports => "Imports",
            StructureCategory::Exports => "Exports",
            StructureCategory::Functions => "Functions",
            StructureCategory::Classes => "Classes",
            StructureCategory::TestCases => "Tests",
            StructureCategory::Endpoints => "Endpoints",
        }
    }

    /// Whether a trimmed line is recognized by this category
    pub fn matches(&self, line: &str) -> bool {
        match self {
            StructureCategory::Imports => line.starts_with("import ") || line.starts_with("require("),
            StructureCategory::Exports => line.starts_with("export "),
            StructureCategory::Functions => FUNCTION_DECL.is_match(line),
            StructureCategory::Classes => CLASS_DECL.is_match(line),
            StructureCategory::TestCases => TEST_CALL.is_match(line),
            StructureCategory::Endpoints => HTTP_ROUTE.is_match(line),
        }
    }
}

impl std::fmt::Display for StructureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Categorized lines from one file, in file order with duplicates preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub test_cases: Vec<String>,
    pub endpoints: Vec<String>,
}

impl StructureReport {
    /// Lines recorded for a category
    pub fn entries(&self, category: StructureCategory) -> &[String] {
        match category {
            StructureCategory::Imports => &self.imports,
            StructureCategory::Exports => &self.exports,
            StructureCategory::Functions => &self.functions,
            StructureCategory::Classes => &self.classes,
            StructureCategory::TestCases => &self.test_cases,
            StructureCategory::Endpoints => &self.endpoints,
        }
    }

    fn entries_mut(&mut self, category: StructureCategory) -> &mut Vec<String> {
        match category {
            StructureCategory::Imports => &mut self.imports,
            StructureCategory::Exports => &mut self.exports,
            StructureCategory::Functions => &mut self.functions,
            StructureCategory::Classes => &mut self.classes,
            StructureCategory::TestCases => &mut self.test_cases,
            StructureCategory::Endpoints => &mut self.endpoints,
        }
    }

    /// Total entries across all categories (a line counts once per category it matched)
    pub fn total(&self) -> usize {
        StructureCategory::ALL
            .iter()
            .map(|c| self.entries(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Stateless structure extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureExtractor;

impl StructureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Classify every line of `text`.
    ///
    /// Lines are split on `\n` only and trimmed before matching; the trimmed
    /// line is what gets recorded. A byte-order mark counts as whitespace.
    /// Total over all inputs.
    pub fn analyze(&self, text: &str) -> StructureReport {
        let mut report = StructureReport::default();

        for line in text.split('\n') {
            let line = trim_line(line);

            for category in StructureCategory::ALL {
                if category.matches(line) {
                    report.entries_mut(category).push(line.to_string());
                }
            }
        }

        report
    }
}

fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Shorthand for `StructureExtractor::new().analyze(text)`
pub fn analyze_structure(text: &str) -> StructureReport {
    StructureExtractor::new().analyze(text)
}
