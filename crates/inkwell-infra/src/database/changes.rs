//! Writes staged on a data context until `save`.

use inkwell_core::domain::Post;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) enum PendingChange {
    Create(Post),
    Update(Post),
    Delete(Post),
}

/// Ordered list of staged writes owned by one data context.
#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    pending: Mutex<Vec<PendingChange>>,
}

impl ChangeSet {
    pub(crate) async fn stage(&self, change: PendingChange) {
        self.pending.lock().await.push(change);
    }

    /// Take every staged write, leaving the set empty.
    pub(crate) async fn take(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock().await)
    }
}
