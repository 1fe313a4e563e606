//! Progress Streaming
//!
//! Event-based progress reporting for the documentation loop. The generator
//! publishes events on a broadcast channel; the CLI subscribes and renders them.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use tokio::sync::broadcast;

/// Progress event types
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Batch started
    Started { total: usize },
    /// A file is about to be processed (`completed` is 1-based)
    FileProgress {
        completed: usize,
        total: usize,
        current_item: String,
    },
    /// Status message
    Message {
        level: MessageLevel,
        message: String,
    },
    /// A file failed; the batch continues
    Error { item: String, error: String },
    /// Batch finished
    Finished {
        success: bool,
        total_duration_secs: u64,
        summary: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Progress tracker state
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    /// Files started so far
    pub completed: usize,
    /// Files in the batch
    pub total: usize,
    /// File currently being processed
    pub current_item: String,
    /// Files that produced a failure document or could not be written
    pub errors: usize,
    /// Whether currently running
    pub is_running: bool,
}

/// Progress tracker shared between the generator and a renderer
#[derive(Clone)]
pub struct ProgressTracker {
    state: Arc<RwLock<ProgressState>>,
    sender: broadcast::Sender<ProgressEvent>,
    start_time: Arc<RwLock<Option<Instant>>>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);

        Self {
            state: Arc::new(RwLock::new(ProgressState::default())),
            sender,
            start_time: Arc::new(RwLock::new(None)),
        }
    }

    /// Send an event; dropped silently when nobody is subscribed.
    #[inline]
    fn emit(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to progress events
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    /// Get current state
    pub fn state(&self) -> ProgressState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Start tracking a batch of `total` files
    pub fn start(&self, total: usize) {
        *self
            .start_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Instant::now());

        {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *state = ProgressState {
                total,
                is_running: true,
                ..Default::default()
            };
        }

        self.emit(ProgressEvent::Started { total });
    }

    /// Mark file `completed` (1-based) as the current item
    pub fn update_progress(&self, completed: usize, current_item: &str) {
        let total = {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            state.completed = completed;
            state.current_item = current_item.to_string();
            state.total
        };

        self.emit(ProgressEvent::FileProgress {
            completed,
            total,
            current_item: current_item.to_string(),
        });
    }

    /// Report an isolated per-file failure
    pub fn report_error(&self, item: &str, error: &str) {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .errors += 1;

        self.emit(ProgressEvent::Error {
            item: item.to_string(),
            error: error.to_string(),
        });
    }

    /// Send a status message
    pub fn message(&self, level: MessageLevel, message: &str) {
        self.emit(ProgressEvent::Message {
            level,
            message: message.to_string(),
        });
    }

    /// Finish tracking
    pub fn finish(&self, success: bool, summary: &str) {
        let duration = self
            .start_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|s| s.elapsed().as_secs())
            .unwrap_or(0);

        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_running = false;

        self.emit(ProgressEvent::Finished {
            success,
            total_duration_secs: duration,
            summary: summary.to_string(),
        });
    }
}

/// Render a simple progress bar
pub fn render_progress_bar(completed: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return format!("[{}]", " ".repeat(width));
    }

    let progress = (completed as f32 / total as f32).min(1.0);
    let filled = (progress * width as f32) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Format duration as human-readable string
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
