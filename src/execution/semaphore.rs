use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A small, blocking counting semaphore.
///
/// Bounds how many chunks run at once.
pub(crate) struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

impl Semaphore {
    /// `permits` must be non-zero or `acquire` blocks forever.
    pub(crate) fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            cv: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The count stays valid even if a holder panicked.
        self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire one permit, blocking until available.
    ///
    /// Returns the time spent waiting (zero if no wait was required).
    pub(crate) fn acquire(&self) -> Duration {
        let start = Instant::now();
        let mut waited = false;
        let mut g = self.lock();
        while *g == 0 {
            waited = true;
            g = self.cv.wait(g).unwrap_or_else(PoisonError::into_inner);
        }
        *g -= 1;
        if waited { start.elapsed() } else { Duration::ZERO }
    }

    /// Release one permit.
    pub(crate) fn release(&self) {
        let mut g = self.lock();
        *g += 1;
        self.cv.notify_one();
    }
}
