use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// How the partitions of an async batch are executed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// One partition at a time, in order.
    #[default]
    Sequential,

    /// Every partition at once; affected rows are summed.
    Concurrent,
}

/// Options for the async batch operations.
#[derive(Debug, Default, Clone)]
pub struct BatchOptions {
    pub mode: BatchMode,

    /// Checked before each partition starts.
    pub cancel: Option<CancellationToken>,
}

impl BatchOptions {
    pub fn concurrent() -> BatchOptions {
        BatchOptions {
            mode: BatchMode::Concurrent,
            cancel: None,
        }
    }

    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Cooperative cancellation signal shared between clones.
#[derive(Debug, Default, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
