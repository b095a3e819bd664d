use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix timestamps (whole seconds) stamped onto metrics at encode time.
pub trait Clock {
    /// Returns the current Unix time in seconds.
    fn now(&self) -> u64;
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> u64 {
        (*self).now()
    }
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> u64 {
        self.as_ref().now()
    }
}

/// Wall clock that never goes backwards.
///
/// If the system time steps back, the last value handed out is repeated until
/// the wall clock catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    /// Creates a clock reading the system time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let previous = self.last.fetch_max(wall, Ordering::AcqRel);
        previous.max(wall)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(u64);

impl FixedClock {
    /// Creates a clock that always reports `timestamp`.
    #[must_use]
    pub const fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
