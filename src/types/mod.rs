pub mod error;
pub mod utils;

pub use error::{DocsmithError, ErrorCategory, ErrorClassifier, LlmError, Result};
