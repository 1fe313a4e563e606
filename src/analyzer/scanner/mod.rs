pub mod file_scanner;
pub mod patterns;

pub use file_scanner::{FileScanner, ScannedFile};
pub use patterns::{IgnoreMatcher, expand_braces};
