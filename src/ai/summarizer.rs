//! File Summarization
//!
//! The narrow boundary between documentation generation and a remote model:
//! `summarize(text) -> String`. Implementations never fail; provider errors
//! come back as an inline `Summary error: ...` string so one bad call cannot
//! stop a batch.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::provider::SharedProvider;
use crate::constants::summary;
use crate::types::utils::char_prefix;

/// Produces a natural-language summary for one file's content
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, content: &str) -> String;

    /// Short label for logs and the CLI header
    fn describe(&self) -> String;
}

/// Fixed instructional prompt wrapped around the file prefix
pub fn build_prompt(code: &str) -> String {
    format!(
        "Analyze this code file and provide:\n\
         1. Core functionality\n\
         2. Key dependencies\n\
         3. Potential issues\n\
         4. Optimization suggestions\n\
         \n\
         Code:\n\
         {}",
        code
    )
}

/// Summarizer backed by an `LlmProvider`
pub struct LlmSummarizer {
    provider: SharedProvider,
    prompt_chars: usize,
}

impl LlmSummarizer {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            provider,
            prompt_chars: summary::PROMPT_CHARS,
        }
    }

    pub fn with_prompt_chars(mut self, prompt_chars: usize) -> Self {
        self.prompt_chars = prompt_chars;
        self
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, content: &str) -> String {
        let prompt = build_prompt(char_prefix(content, self.prompt_chars));

        match self.provider.generate(&prompt).await {
            Ok(response) => {
                debug!(
                    provider = %response.metadata.provider,
                    tokens = response.usage.total(),
                    elapsed_ms = response.timing.total_ms,
                    "Summary generated"
                );
                response.content.trim().to_string()
            }
            Err(e) => {
                warn!("Summary failed: {}", e);
                format!("{}: {}", summary::ERROR_PREFIX, e)
            }
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.provider.name(), self.provider.model())
    }
}

/// Offline summarizer used with `--no-summary` or `provider = "none"`
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSummarizer;

pub const DISABLED_NOTICE: &str = "_Summary generation disabled._";

#[async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(&self, _content: &str) -> String {
        DISABLED_NOTICE.to_string()
    }

    fn describe(&self) -> String {
        "disabled".to_string()
    }
}
