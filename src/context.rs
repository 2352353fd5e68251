//! Request-scoped cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::ProviderError;

/// Cancellation handle for one lifecycle operation.
///
/// Clones share the cancellation flag, so the framework side can cancel
/// while a conversion is running on another thread.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    canceled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        RequestContext {
            canceled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail with [`ProviderError::Canceled`] once the operation must stop.
    pub fn ensure_active(&self, operation: &str) -> Result<(), ProviderError> {
        if self.is_canceled() {
            return Err(ProviderError::Canceled(format!(
                "context canceled before {operation}"
            )));
        }
        if self.is_expired() {
            return Err(ProviderError::Canceled(format!(
                "context deadline exceeded before {operation}"
            )));
        }
        Ok(())
    }
}
