//! AI Integration Layer
//!
//! Provider abstraction plus the summarization boundary used by the generator.

pub mod provider;
pub mod summarizer;

pub use provider::{
    ErrorCategory, ErrorClassifier, GeminiProvider, LlmError, LlmProvider, LlmResponse,
    OllamaProvider, OpenAiProvider, ProviderConfig, ResponseMetadata, ResponseTiming,
    SharedProvider, TokenUsage, create_provider,
};
pub use summarizer::{DisabledSummarizer, LlmSummarizer, Summarizer, build_prompt};
