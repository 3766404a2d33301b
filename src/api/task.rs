use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Cancellation side of an in-flight transfer.
///
/// Cancelling only asks the transfer to stop; the session still runs its
/// completion path and reports a `TransportError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct TransferHandle {
    token: CancellationToken,
}

impl TransferHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

#[derive(Debug, Default)]
struct TaskState {
    expired: bool,
    transfer: Option<TransferHandle>,
}

/// Handle for one logical fetch.
///
/// Clones share state, so the caller can keep a copy while the session holds
/// another in its registry.
#[derive(Debug, Clone)]
pub struct Task {
    id: Arc<str>,
    state: Arc<Mutex<TaskState>>,
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

impl Task {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string().into(),
            state: Arc::new(Mutex::new(TaskState::default())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_expired(&self) -> bool {
        self.state.lock().expired
    }

    /// Whether a transfer was ever attached, i.e. the task was actually sent.
    pub fn is_sent(&self) -> bool {
        self.state.lock().transfer.is_some()
    }

    /// Associates the underlying transfer. Only the first call takes effect.
    pub(crate) fn attach(&self, transfer: TransferHandle) -> bool {
        let mut state = self.state.lock();
        if state.transfer.is_some() {
            tracing::warn!(task_id = %self.id, "transfer already attached, ignoring");
            return false;
        }
        state.transfer = Some(transfer);
        true
    }

    /// Marks the eventual result as stale.
    ///
    /// With `should_continue_downloading == false` the attached transfer is
    /// also asked to cancel. Calling this again only repeats that choice.
    pub fn expire(&self, should_continue_downloading: bool) {
        let mut state = self.state.lock();
        state.expired = true;
        tracing::debug!(
            task_id = %self.id,
            should_continue_downloading,
            "task expired"
        );
        if !should_continue_downloading {
            if let Some(transfer) = &state.transfer {
                transfer.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_state() {
        let task = Task::new();
        assert!(!task.is_expired());
        assert!(!task.is_sent());
        assert_eq!(task.id().len(), 36);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new();
        let b = Task::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_expire_continue_keeps_transfer() {
        let task = Task::new();
        let transfer = TransferHandle::new();
        assert!(task.attach(transfer.clone()));
        task.expire(true);
        assert!(task.is_expired());
        assert!(!transfer.is_cancel_requested());
    }

    #[test]
    fn test_expire_cancel_requests_cancellation() {
        let task = Task::new();
        let transfer = TransferHandle::new();
        task.attach(transfer.clone());
        task.expire(true);
        task.expire(false);
        assert!(task.is_expired());
        assert!(transfer.is_cancel_requested());
    }

    #[test]
    fn test_expire_without_transfer() {
        let task = Task::new();
        task.expire(false);
        assert!(task.is_expired());
    }

    #[test]
    fn test_attach_only_once() {
        let task = Task::new();
        let first = TransferHandle::new();
        let second = TransferHandle::new();
        assert!(task.attach(first.clone()));
        assert!(!task.attach(second.clone()));
        task.expire(false);
        assert!(first.is_cancel_requested());
        assert!(!second.is_cancel_requested());
    }

    #[test]
    fn test_clones_share_state() {
        let task = Task::new();
        let copy = task.clone();
        copy.expire(true);
        assert!(task.is_expired());
        assert_eq!(task.id(), copy.id());
    }
}
