//! Embassy-backed time source.
//!
//! Ticks are microseconds from `embassy_time::Instant`, truncated to `u32`
//! (wraps every ~71.6 minutes). Trace line prefixes use the full 64-bit
//! millisecond uptime so they never wrap.

use embassy_time::Instant;
use evtrace_common::{TickUnit, TimeSource};

/// Microsecond clock driven by the RP2350 timer peripheral.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl TimeSource for EmbassyClock {
    const UNIT: TickUnit = TickUnit::Micros;

    #[inline]
    fn now(&self) -> u32 { Instant::now().as_micros() as u32 }

    #[inline]
    fn uptime_ms(&self) -> u64 { Instant::now().as_millis() }
}
