//! CLI Common Utilities
//!
//! Shared configuration and summarizer setup for command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ai::{DisabledSummarizer, LlmSummarizer, ProviderConfig, Summarizer, create_provider};
use crate::config::{Config, ConfigLoader};
use crate::types::{DocsmithError, Result};

/// Provider name that turns summaries off
pub const NO_PROVIDER: &str = "none";

/// Workspace root from an optional CLI path (defaults to the current directory)
pub fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        return Err(DocsmithError::WorkspaceNotFound(root));
    }
    Ok(root)
}

/// Effective configuration: an explicit `--config` file, or the layered chain for `root`
pub fn load_config(root: &Path, config_file: Option<&Path>) -> Result<Config> {
    match config_file {
        Some(file) => ConfigLoader::load_from_file(file),
        None => ConfigLoader::load(root),
    }
}

/// Build the summarizer selected by configuration
pub fn build_summarizer(config: &Config, disabled: bool) -> Result<Arc<dyn Summarizer>> {
    if disabled || config.llm.provider == NO_PROVIDER {
        return Ok(Arc::new(DisabledSummarizer));
    }

    let provider = create_provider(&ProviderConfig::from(&config.llm))?;
    Ok(Arc::new(
        LlmSummarizer::new(provider).with_prompt_chars(config.llm.prompt_chars),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_root_rejects_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            resolve_root(Some(missing)),
            Err(DocsmithError::WorkspaceNotFound(_))
        ));
        assert!(resolve_root(Some(dir.path().to_path_buf())).is_ok());
    }

    #[test]
    fn test_build_summarizer_disabled() {
        let summarizer = build_summarizer(&Config::default(), true).unwrap();
        assert_eq!(summarizer.describe(), "disabled");

        let mut config = Config::default();
        config.llm.provider = NO_PROVIDER.to_string();
        let summarizer = build_summarizer(&config, false).unwrap();
        assert_eq!(summarizer.describe(), "disabled");
    }

    #[test]
    fn test_build_summarizer_with_provider() {
        let mut config = Config::default();
        config.llm.provider = "ollama".to_string();
        config.llm.model = "codellama".to_string();

        let summarizer = build_summarizer(&config, false).unwrap();
        assert_eq!(summarizer.describe(), "ollama (codellama)");
    }

    #[test]
    fn test_build_summarizer_unknown_provider() {
        let mut config = Config::default();
        config.llm.provider = "mystery".to_string();
        assert!(build_summarizer(&config, false).is_err());
    }
}
