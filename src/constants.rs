//! Global Constants
//!
//! Centralized constants for scanning, rendering and provider tuning.
//! All magic numbers should be defined here with documentation.

/// Workspace scanning constants
pub mod scan {
    /// Source/config/markup extensions eligible for documentation (lowercase)
    pub const CODE_FILE_EXTENSIONS: &[&str] = &[
        "js", "ts", "jsx", "tsx", "py", "java", "cs", "php", "html", "css", "scss", "json", "md",
        "xml", "yaml", "yml", "sh", "bat", "cmd", "ps1", "vue", "svelte", "go", "rs", "swift", "kt",
        "dart", "lua", "sql", "c", "cpp", "h", "hpp", "m", "mm", "rb", "pl",
    ];

    /// Dependency, version-control and build-output directories
    pub const DEFAULT_IGNORE_PATTERN: &str = "**/{node_modules,.git,dist,bin}/**";

    /// Image, audio and binary files
    pub const BINARY_EXCLUDE_PATTERN: &str = "**/*.{png,jpg,pdf,mp3,exe,dll}";
}

/// Markdown rendering constants
pub mod render {
    /// Characters of file content shown in the preview block
    pub const PREVIEW_CHARS: usize = 300;

    /// Example lines shown per structure category
    pub const MAX_EXAMPLES: usize = 5;

    /// Maximum characters per example line before truncation
    pub const EXAMPLE_WIDTH: usize = 60;

    /// Suffix appended to truncated example lines
    pub const ELLIPSIS: &str = "...";
}

/// Output layout constants
pub mod output {
    /// Documentation root, relative to the workspace root
    pub const DOC_ROOT_DIR: &str = "documentations";

    /// Suffix appended to each source file name
    pub const DOC_SUFFIX: &str = ".md";
}

/// Summarization constants
pub mod summary {
    /// Characters of file content sent to the provider
    pub const PROMPT_CHARS: usize = 1500;

    /// Prefix of the inline error string returned on provider failure
    pub const ERROR_PREFIX: &str = "Summary error";
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Default generation budget (tokens)
    pub const DEFAULT_MAX_TOKENS: usize = 1024;
}
