//! `EventLogger` backed by `tracing`.

use inkwell_core::ports::EventLogger;

/// Forwards editor events to the global tracing subscriber under the
/// `post_editor` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLogger;

impl EventLogger for TracingEventLogger {
    fn log_info(&self, message: &str) {
        tracing::info!(target: "post_editor", "{}", message);
    }

    fn log_error(&self, message: &str) {
        tracing::error!(target: "post_editor", "{}", message);
    }
}
