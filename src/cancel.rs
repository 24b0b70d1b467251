use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

type CancelFn = Box<dyn FnOnce() + Send>;

/// Slot through which a connection exposes how to abort the request in flight.
///
/// The connection and the result set share clones of the same hook. Closing the result set
/// clears it, so a later cancellation no longer touches a finished request.
#[derive(Clone, Default)]
pub struct CancelHook {
    inner: Arc<Mutex<Option<CancelFn>>>,
}

impl CancelHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the cancellation action, replacing any previous one
    pub fn set(&self, cancel: impl FnOnce() + Send + 'static) {
        *self.lock() = Some(Box::new(cancel));
    }

    /// Drop the action without running it
    pub fn clear(&self) {
        self.lock().take();
    }

    /// Run the action if one is installed. Returns whether it ran.
    pub fn cancel(&self) -> bool {
        // released before running the action, which may touch the hook again
        let cancel = self.lock().take();
        match cancel {
            Some(cancel) => {
                cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CancelFn>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CancelHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHook")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_cancel_runs_once() {
        let hook = CancelHook::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        hook.set(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(hook.is_set());
        assert!(hook.clone().cancel());
        assert!(!hook.cancel());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_shared_between_clones() {
        let conn_side = CancelHook::new();
        let rows_side = conn_side.clone();
        conn_side.set(|| {});
        rows_side.clear();
        assert!(!conn_side.is_set());
        assert!(!conn_side.cancel());
    }
}
