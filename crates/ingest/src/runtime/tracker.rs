use tokio::sync::watch;

/// Count of file names submitted but not yet finished.
pub struct PendingTracker {
    pending: watch::Sender<usize>,
}

impl Default for PendingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingTracker {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self { pending }
    }

    pub fn register(&self) {
        self.pending.send_modify(|n| *n += 1);
    }

    pub fn mark_done(&self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }

    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Resolves once every registered name has been marked done.
    pub async fn wait_idle(&self) {
        let mut rx = self.pending.subscribe();
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}
