//! Documentation Output
//!
//! - `markdown`: per-file page template
//! - `generator`: workspace loop writing pages into a mirrored tree

pub mod generator;
pub mod markdown;

pub use generator::{DocGenerator, GenerationReport, NO_FILES_MESSAGE, doc_path_for};
pub use markdown::{FileDoc, RenderOptions, render_failure_doc, render_file_doc};
