pub mod commands;
pub mod progress;
pub mod ui;
pub mod util;

pub use progress::{MessageLevel, ProgressEvent, ProgressState, ProgressTracker};
pub use util::{build_summarizer, load_config, resolve_root};
