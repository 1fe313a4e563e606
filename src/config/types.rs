//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/docsmith/) and project (.docsmith/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{network, output, render, scan, summary};
use crate::types::{DocsmithError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Workspace scanning settings
    pub scan: ScanConfig,

    /// Documentation output settings
    pub output: OutputConfig,

    /// LLM provider settings
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `DocsmithError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DocsmithError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(DocsmithError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.prompt_chars == 0 {
            return Err(DocsmithError::Config(
                "LLM prompt_chars must be greater than 0".to_string(),
            ));
        }

        if self.scan.extensions.is_empty() {
            return Err(DocsmithError::Config(
                "scan.extensions must list at least one extension".to_string(),
            ));
        }

        if self.output.dir.as_os_str().is_empty() {
            return Err(DocsmithError::Config(
                "output.dir must not be empty".to_string(),
            ));
        }

        if self.output.dir.is_absolute() {
            return Err(DocsmithError::Config(format!(
                "output.dir must be relative to the workspace root, got {}",
                self.output.dir.display()
            )));
        }

        if self.output.preview_chars == 0
            || self.output.max_examples == 0
            || self.output.example_width == 0
        {
            return Err(DocsmithError::Config(
                "output.preview_chars, max_examples and example_width must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Eligible file extensions (case-insensitive, without the dot)
    pub extensions: Vec<String>,

    /// Ignore globs; brace alternatives like `{a,b}` are supported
    pub ignore_patterns: Vec<String>,

    /// Image/audio/binary exclusion globs
    pub binary_patterns: Vec<String>,

    /// Honour .gitignore files while walking
    pub respect_gitignore: bool,

    /// Skip files larger than this many bytes (unlimited when unset)
    pub max_file_size: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: scan::CODE_FILE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            ignore_patterns: vec![scan::DEFAULT_IGNORE_PATTERN.to_string()],
            binary_patterns: vec![scan::BINARY_EXCLUDE_PATTERN.to_string()],
            respect_gitignore: false,
            max_file_size: None,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (relative to the workspace root)
    pub dir: PathBuf,

    /// Characters of file content in the preview block
    pub preview_chars: usize,

    /// Example lines per structure category
    pub max_examples: usize,

    /// Characters per example line before truncation
    pub example_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(output::DOC_ROOT_DIR),
            preview_chars: render::PREVIEW_CHARS,
            max_examples: render::MAX_EXAMPLES,
            example_width: render::EXAMPLE_WIDTH,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "gemini", "openai", "ollama" or "none"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Characters of file content included in the prompt
    pub prompt_chars: usize,

    /// API key; falls back to the provider's environment variable.
    /// Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("prompt_chars", &self.prompt_chars)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.2,
            max_tokens: network::DEFAULT_MAX_TOKENS,
            prompt_chars: summary::PROMPT_CHARS,
            api_key: None,
            api_base: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.prompt_chars, 1500);
        assert_eq!(config.output.dir, PathBuf::from("documentations"));
        assert_eq!(config.output.preview_chars, 300);
        assert_eq!(config.scan.extensions.len(), 37);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(matches!(config.validate(), Err(DocsmithError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_absolute_output_dir() {
        let mut config = Config::default();
        config.output.dir = std::env::temp_dir();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::default();
        config.scan.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_redacted_and_not_serialized() {
        let mut config = LlmConfig::default();
        config.api_key = Some("secret-key".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
