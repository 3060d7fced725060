use std::{
    sync::{Condvar, Mutex, PoisonError},
    time::Duration,
};

/// A cancellation token shared between the sampling loop and the Ctrl-C handler.
pub struct CancellationToken {
    // Setting this to true marks the token as cancelled.
    mutex: Mutex<bool>,
    cvar: Condvar,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self {
            mutex: Mutex::new(false),
            cvar: Condvar::new(),
        }
    }
}

impl CancellationToken {
    /// Mark the [`CancellationToken`] as cancelled.
    ///
    /// This is idempotent, and once cancelled, will stay cancelled.
    pub fn cancel(&self) {
        let mut guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);

        if !*guard {
            *guard = true;
            self.cvar.notify_all();
        }
    }

    /// Sleep for up to `duration`, waking early if the token is cancelled.
    ///
    /// Returns whether the token is cancelled.
    pub fn sleep_with_cancellation(&self, duration: Duration) -> bool {
        let guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);

        let (result, _) = self
            .cvar
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);

        *result
    }
}
