//! Markdown Renderer
//!
//! Turns one file's analysis into a standalone markdown document:
//! metadata, code structure, AI analysis and a fenced preview.

use serde::Serialize;

use crate::analyzer::{DependencySet, StructureCategory, StructureReport};
use crate::constants::render;
use crate::types::utils::{char_prefix, truncate_chars};

/// Category order inside the "Code Structure" block
pub const RENDER_ORDER: [StructureCategory; 6] = [
    StructureCategory::Imports,
    StructureCategory::Exports,
    StructureCategory::Functions,
    StructureCategory::Classes,
    StructureCategory::Endpoints,
    StructureCategory::TestCases,
];

/// Everything the template needs for one source file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDoc {
    /// `/`-separated path relative to the workspace root
    pub relative_path: String,
    /// Extension used as the preview's code fence tag
    pub extension: String,
    pub size: u64,
    /// Pre-formatted modification timestamp
    pub modified: String,
    pub structure: StructureReport,
    pub dependencies: DependencySet,
    pub summary: String,
    /// Full file text; the renderer takes the preview prefix
    #[serde(skip)]
    pub content: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub preview_chars: usize,
    pub max_examples: usize,
    pub example_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_chars: render::PREVIEW_CHARS,
            max_examples: render::MAX_EXAMPLES,
            example_width: render::EXAMPLE_WIDTH,
        }
    }
}

impl From<&crate::config::OutputConfig> for RenderOptions {
    fn from(config: &crate::config::OutputConfig) -> Self {
        Self {
            preview_chars: config.preview_chars,
            max_examples: config.max_examples,
            example_width: config.example_width,
        }
    }
}

/// Render the full documentation page for one file
pub fn render_file_doc(doc: &FileDoc, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("# `{}` Documentation\n\n", doc.relative_path));

    output.push_str("## Metadata\n");
    output.push_str(&format!("- **Size**: {} bytes\n", doc.size));
    output.push_str(&format!("- **Modified**: {}\n", doc.modified));
    output.push_str(&format!(
        "- **Dependencies**: {}\n\n",
        doc.dependencies.display_list()
    ));

    output.push_str("## Code Structure\n");
    for category in RENDER_ORDER {
        let section = render_section(
            category.title(),
            doc.structure.entries(category),
            options,
        );
        if !section.is_empty() {
            output.push_str(&section);
            output.push('\n');
        }
    }
    output.push('\n');

    output.push_str("## AI Analysis\n");
    output.push_str(&doc.summary);
    output.push_str("\n\n");

    output.push_str("## Preview\n");
    output.push_str(&format!("```{}\n", doc.extension));
    output.push_str(preview(&doc.content, options.preview_chars));
    output.push_str("\n```\n");

    output
}

/// One structure category: heading, up to `max_examples` items, then a `+N more` marker.
/// Returns an empty string for an empty category.
pub fn render_section(title: &str, items: &[String], options: &RenderOptions) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut section = format!("### {} ({})\n", title, items.len());
    for item in items.iter().take(options.max_examples) {
        section.push_str(&format!(
            "- `{}`\n",
            truncate_chars(item, options.example_width, render::ELLIPSIS)
        ));
    }
    if items.len() > options.max_examples {
        section.push_str(&format!(
            "- ...+{} more\n",
            items.len() - options.max_examples
        ));
    }
    section
}

/// Leading characters of the file shown in the preview block
pub fn preview(content: &str, preview_chars: usize) -> &str {
    char_prefix(content, preview_chars)
}

/// Replacement document when a file could not be processed
pub fn render_failure_doc(message: &str) -> String {
    format!("# Documentation Generation Failed\n**Error:** {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_structure, extract_dependencies};

    fn doc_for(content: &str) -> FileDoc {
        FileDoc {
            relative_path: "src/app.js".to_string(),
            extension: "js".to_string(),
            size: content.len() as u64,
            modified: "2024-01-02 03:04:05".to_string(),
            structure: analyze_structure(content),
            dependencies: extract_dependencies(content),
            summary: "Bootstraps the app.".to_string(),
            content: content.to_string(),
        }
    }

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("import m{} from 'm{}';", i, i)).collect()
    }

    #[test]
    fn test_section_truncates_to_five_with_more_marker() {
        let section = render_section("Imports", &lines(7), &RenderOptions::default());
        let rendered: Vec<&str> = section.lines().collect();

        assert_eq!(rendered[0], "### Imports (7)");
        assert_eq!(rendered.iter().filter(|l| l.starts_with("- `")).count(), 5);
        assert_eq!(rendered.last(), Some(&"- ...+2 more"));
    }

    #[test]
    fn test_section_exactly_max_has_no_marker() {
        let section = render_section("Imports", &lines(5), &RenderOptions::default());
        assert!(!section.contains("more"));
        assert_eq!(section.lines().count(), 6);
    }

    #[test]
    fn test_empty_section_renders_nothing() {
        assert_eq!(render_section("Classes", &[], &RenderOptions::default()), "");

        let doc = render_file_doc(&doc_for("const x = 1;"), &RenderOptions::default());
        assert!(!doc.contains("###"));
    }

    #[test]
    fn test_long_example_is_truncated() {
        let long = format!("function {}() {{}}", "a".repeat(80));
        let section = render_section("Functions", &[long.clone()], &RenderOptions::default());

        let expected = format!("- `{}...`", &long[..60]);
        assert!(section.contains(&expected));
    }

    #[test]
    fn test_full_document_layout() {
        let content = "import React from 'react';\nexport function App() {}\nclass Store {}\n";
        let doc = render_file_doc(&doc_for(content), &RenderOptions::default());

        assert!(doc.starts_with("# `src/app.js` Documentation\n\n## Metadata\n"));
        assert!(doc.contains(&format!("- **Size**: {} bytes\n", content.len())));
        assert!(doc.contains("- **Modified**: 2024-01-02 03:04:05\n"));
        assert!(doc.contains("- **Dependencies**: react\n"));
        assert!(doc.contains("### Exports (1)\n- `export function App() {}`\n"));
        assert!(doc.contains("## AI Analysis\nBootstraps the app.\n\n## Preview\n```js\n"));
        assert!(doc.ends_with("class Store {}\n\n```\n"));

        let imports = doc.find("### Imports").unwrap();
        let functions = doc.find("### Functions").unwrap();
        let classes = doc.find("### Classes").unwrap();
        assert!(imports < functions && functions < classes);
    }

    #[test]
    fn test_endpoints_render_before_tests() {
        let content = "it('GET /users works', () => {});";
        let doc = render_file_doc(&doc_for(content), &RenderOptions::default());

        let endpoints = doc.find("### Endpoints (1)").unwrap();
        let tests = doc.find("### Tests (1)").unwrap();
        assert!(endpoints < tests);
    }

    #[test]
    fn test_no_dependencies_renders_none() {
        let doc = render_file_doc(&doc_for("let a = 1;"), &RenderOptions::default());
        assert!(doc.contains("- **Dependencies**: None\n"));
    }

    #[test]
    fn test_preview_limited_to_configured_chars() {
        let content = "é".repeat(400);
        assert_eq!(preview(&content, 300).chars().count(), 300);

        let options = RenderOptions {
            preview_chars: 10,
            ..Default::default()
        };
        let doc = render_file_doc(&doc_for(&content), &options);
        assert!(doc.contains(&format!("```js\n{}\n```", "é".repeat(10))));
    }

    #[test]
    fn test_failure_doc() {
        assert_eq!(
            render_failure_doc("permission denied"),
            "# Documentation Generation Failed\n**Error:** permission denied"
        );
    }
}
