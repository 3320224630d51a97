//! Logging port.

/// Diagnostic sink for editor operations.
pub trait EventLogger: Send + Sync {
    fn log_info(&self, message: &str);

    fn log_error(&self, message: &str);
}
