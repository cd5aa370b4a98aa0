//! Time source abstraction.
//!
//! The core only ever needs "read the current tick". Ticks are `u32` and wrap,
//! so every difference between two readings must use `wrapping_sub`:
//! - microsecond clock: wraps every ~71.6 minutes
//! - millisecond clock: wraps every ~49.7 days
//!
//! A difference is only meaningful if less than one full wrap elapsed between
//! the two readings.

use core::sync::atomic::{AtomicU32, Ordering};

/// Resolution of a [`TimeSource`] tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickUnit {
    /// One tick per microsecond.
    Micros,
    /// One tick per millisecond.
    Millis,
}

impl TickUnit {
    /// Number of ticks in one millisecond.
    #[inline]
    pub const fn ticks_per_ms(self) -> u32 {
        match self {
            Self::Micros => 1_000,
            Self::Millis => 1,
        }
    }

    /// Convert a tick count to whole milliseconds.
    #[inline]
    pub const fn to_millis(
        self,
        ticks: u32,
    ) -> u32 {
        ticks / self.ticks_per_ms()
    }
}

/// Monotonic wrapping tick counter.
pub trait TimeSource {
    /// Resolution of [`TimeSource::now`].
    const UNIT: TickUnit;

    /// Current tick count. Wraps at `u32::MAX`.
    fn now(&self) -> u32;

    /// Milliseconds since start, used for trace line prefixes.
    ///
    /// The default derives it from [`TimeSource::now`] and therefore wraps with
    /// the tick counter. Sources with a wider counter should override it.
    fn uptime_ms(&self) -> u64 { u64::from(Self::UNIT.to_millis(self.now())) }
}

impl<T: TimeSource> TimeSource for &T {
    const UNIT: TickUnit = T::UNIT;

    #[inline]
    fn now(&self) -> u32 { (**self).now() }

    #[inline]
    fn uptime_ms(&self) -> u64 { (**self).uptime_ms() }
}

// =============================================================================
// Manual Clock
// =============================================================================

/// Millisecond clock that only moves when told to.
///
/// Usable through `&self`, so one instance can be shared between a trace
/// channel and an event timer. Used by host tests and by tools replaying
/// recorded timestamps.
pub struct ManualClock {
    ticks: AtomicU32,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub const fn new(start: u32) -> Self {
        Self {
            ticks: AtomicU32::new(start),
        }
    }

    /// Jump to an absolute tick value.
    #[inline]
    pub fn set(
        &self,
        ticks: u32,
    ) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }

    /// Move forward by `delta` ticks, wrapping at `u32::MAX`.
    #[inline]
    pub fn advance(
        &self,
        delta: u32,
    ) {
        // load/store instead of fetch_add: thumbv6m has no atomic RMW
        let now = self.ticks.load(Ordering::Relaxed);
        self.ticks.store(now.wrapping_add(delta), Ordering::Relaxed);
    }
}

impl Default for ManualClock {
    fn default() -> Self { Self::new(0) }
}

impl TimeSource for ManualClock {
    const UNIT: TickUnit = TickUnit::Millis;

    #[inline]
    fn now(&self) -> u32 { self.ticks.load(Ordering::Relaxed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_unit_conversion() {
        assert_eq!(TickUnit::Micros.to_millis(1_500), 1);
        assert_eq!(TickUnit::Millis.to_millis(1_500), 1_500);
        assert_eq!(TickUnit::Micros.ticks_per_ms(), 1_000);
    }

    #[test]
    fn test_manual_clock_advance_wraps() {
        let clock = ManualClock::new(u32::MAX - 5);
        clock.advance(10);
        assert_eq!(clock.now(), 4);
    }

    #[test]
    fn test_uptime_from_ticks() {
        let clock = ManualClock::new(12_345);
        assert_eq!(clock.uptime_ms(), 12_345);

        // Through a reference
        let by_ref = &clock;
        clock.set(7);
        assert_eq!(by_ref.now(), 7);
    }
}
