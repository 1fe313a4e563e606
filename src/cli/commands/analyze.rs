//! Analyze Command
//!
//! Runs the structure and dependency analyzers on a single file and prints
//! the result. No summary, no files written.

use std::path::Path;

use serde::Serialize;

use crate::analyzer::{DependencySet, StructureReport, analyze_structure, extract_dependencies};
use crate::cli::ui::Output;
use crate::docs::markdown::{RENDER_ORDER, RenderOptions, render_section};
use crate::types::{DocsmithError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub path: String,
    pub lines: usize,
    pub structure: StructureReport,
    pub dependencies: DependencySet,
}

/// Analyze one file's text
pub fn analyze_file(path: &Path) -> Result<FileAnalysis> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    Ok(FileAnalysis {
        path: path.display().to_string(),
        lines: content.split('\n').count(),
        structure: analyze_structure(&content),
        dependencies: extract_dependencies(&content),
    })
}

pub fn run(file: &Path, format: &str) -> Result<()> {
    let analysis = analyze_file(file)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        "text" => print_text(&analysis),
        other => {
            return Err(DocsmithError::Config(format!(
                "Unknown format '{}'. Valid values: text, json",
                other
            )));
        }
    }

    Ok(())
}

fn print_text(analysis: &FileAnalysis) {
    let output = Output::new();
    let options = RenderOptions::default();

    output.header(&analysis.path);
    output.kv("Lines", &analysis.lines.to_string());
    output.kv("Dependencies", &analysis.dependencies.display_list());

    if analysis.structure.is_empty() {
        output.info("No structure hints found");
        return;
    }

    println!();
    for category in RENDER_ORDER {
        let section = render_section(
            category.title(),
            analysis.structure.entries(category),
            &options,
        );
        if !section.is_empty() {
            println!("{}", section);
        }
    }
}
