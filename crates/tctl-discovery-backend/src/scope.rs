use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellable scope threaded through all fetch calls (§5).
///
/// A SIGINT/SIGTERM handler calls `cancel()`; every paged fetch loop
/// checks `is_cancelled()` between pages and bails out with an error
/// rather than starting another round trip.
#[derive(Debug, Clone, Default)]
pub struct CancelScope {
    cancelled: Arc<AtomicBool>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        if self.is_cancelled() {
            anyhow::bail!("operation cancelled");
        }
        Ok(())
    }
}
