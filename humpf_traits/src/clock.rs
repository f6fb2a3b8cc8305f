use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Time source for live spring values.
///
/// - now_ms(): milliseconds since the clock's own epoch
/// - ms_since(): helper to compute elapsed milliseconds from an earlier reading
pub trait Clock {
    fn now_ms(&self) -> f64;

    /// Milliseconds elapsed since `earlier`, saturating at 0.
    fn ms_since(&self, earlier: f64) -> f64 {
        (self.now_ms() - earlier).max(0.0)
    }
}

/// Any `Fn() -> f64` returning milliseconds can act as a clock.
impl<F> Clock for F
where
    F: Fn() -> f64,
{
    #[inline]
    fn now_ms(&self) -> f64 {
        self()
    }
}

/// Default, real-time monotonic clock backed by std::time::Instant.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock whose time is moved by hand.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the value under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `ms` instead of 0.
    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(ms)),
        }
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance(&self, ms: f64) {
        *self.lock() += ms;
    }

    /// Set the absolute time in milliseconds.
    pub fn set(&self, ms: f64) {
        *self.lock() = ms;
    }

    /// Poisoning is ignored: the guarded `f64` is always whole.
    fn lock(&self) -> MutexGuard<'_, f64> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        *self.lock()
    }
}
