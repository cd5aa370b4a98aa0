//! Interrupt-safe event timer.
//!
//! Wraps an [`EventTimer`] in an `embassy_sync` mutex that is only ever
//! *tried*, never waited on. The test-and-set runs inside a critical section
//! (interrupts masked on the MCU), but the work done while holding the lock
//! does not, so a long report never delays interrupt handling.
//!
//! If the lock is already held (an interrupt preempted a registration or a
//! report), the new call is dropped. Registration latency stays bounded and
//! tiny; the price is that some events or reports are lost under contention.
//!
//! # Usage
//!
//! ```ignore
//! static TIMER: SharedEventTimer<'static, EmbassyClock> = SharedEventTimer::new(EmbassyClock);
//!
//! // Any context, including interrupt handlers:
//! TIMER.register_event(LOOP_START);
//!
//! // Foreground only (prints):
//! TIMER.report_by_period(1_000_000, &mut channel);
//! ```

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use crate::config::{EV_BUFFER_SIZE, EV_MAX_KINDS};
use crate::event_timer::{EventKind, EventTimer, ReportOutcome};
use crate::format::ReportStyle;
use crate::time::TimeSource;

/// Event timer shared between foreground code and interrupt handlers.
pub struct SharedEventTimer<'a, C, const N: usize = EV_BUFFER_SIZE, const K: usize = EV_MAX_KINDS> {
    timer: Mutex<CriticalSectionRawMutex, EventTimer<'a, N, K>>,
    clock: C,
}

impl<'a, C: TimeSource, const N: usize, const K: usize> SharedEventTimer<'a, C, N, K> {
    /// Create a timer reporting in `seconds.milliseconds` of the clock's unit.
    pub const fn new(clock: C) -> Self { Self::with_style(clock, ReportStyle::Seconds(C::UNIT)) }

    /// Create a timer with an explicit report style.
    pub const fn with_style(
        clock: C,
        style: ReportStyle,
    ) -> Self {
        Self {
            timer: Mutex::new(EventTimer::new(style)),
            clock,
        }
    }

    /// Run `f` on the timer if nobody holds the lock.
    ///
    /// Returns `None` without calling `f` on contention. Every other method
    /// goes through here.
    pub fn with_locked<R>(
        &self,
        f: impl FnOnce(&mut EventTimer<'a, N, K>) -> R,
    ) -> Option<R> {
        let mut timer = self.timer.try_lock().ok()?;
        Some(f(&mut timer))
    }

    /// The time source used for default timestamps.
    #[inline]
    pub const fn clock(&self) -> &C { &self.clock }

    /// Bind a display label to an event kind. Returns `false` if dropped.
    pub fn set_label(
        &self,
        kind: u8,
        text: &'a str,
    ) -> bool {
        self.with_locked(|timer| timer.set_label(kind, text)).is_some()
    }

    /// Bind `texts[i]` to kind `i` for `i >= 1`. Returns `false` if dropped.
    pub fn set_all_labels(
        &self,
        texts: &[&'a str],
    ) -> bool {
        self.with_locked(|timer| timer.set_all_labels(texts)).is_some()
    }

    /// Register `kind` at the current time. Safe from interrupt context.
    ///
    /// Returns `false` if the call was dropped because the timer was locked.
    #[inline]
    pub fn register_event(
        &self,
        kind: EventKind,
    ) -> bool {
        let now = self.clock.now();
        self.register_event_at(kind, now)
    }

    /// Register `kind` with an explicit timestamp. Safe from interrupt context.
    pub fn register_event_at(
        &self,
        kind: EventKind,
        timestamp: u32,
    ) -> bool {
        self.with_locked(|timer| timer.record(kind, timestamp)).is_some()
    }

    /// Print and drain the log. Foreground only.
    ///
    /// Returns `None` if the call was dropped because the timer was locked.
    pub fn report<W: Write>(
        &self,
        out: &mut W,
    ) -> Option<ReportOutcome> {
        self.with_locked(|timer| timer.report(out))
    }

    /// Report at most once per `period` ticks. Foreground only.
    ///
    /// Returns `None` if the period has not elapsed yet or the call was
    /// dropped. A dropped call does not restart the period.
    pub fn report_by_period<W: Write>(
        &self,
        period: u32,
        out: &mut W,
    ) -> Option<ReportOutcome> {
        let now = self.clock.now();
        self.with_locked(|timer| timer.report_if_due(now, period, out)).flatten()
    }

    /// Number of live records, or `None` if the timer is locked.
    pub fn live_records(&self) -> Option<usize> { self.with_locked(|timer| timer.log().len()) }
}

// =============================================================================
// Tests
// =============================================================================
