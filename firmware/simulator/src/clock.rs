//! Host time source.

use std::sync::OnceLock;
use std::time::Instant;

use evtrace_common::{TickUnit, TimeSource};

/// Microseconds since the first reading, truncated to `u32` like the firmware clock.
#[derive(Clone, Copy, Default)]
pub struct StdClock;

impl StdClock {
    fn epoch() -> Instant {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        *EPOCH.get_or_init(Instant::now)
    }
}

impl TimeSource for StdClock {
    const UNIT: TickUnit = TickUnit::Micros;

    fn now(&self) -> u32 { Self::epoch().elapsed().as_micros() as u32 }

    fn uptime_ms(&self) -> u64 { Self::epoch().elapsed().as_millis() as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_monotonic() {
        let clock = StdClock;
        let a = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = clock.now();
        assert!(b.wrapping_sub(a) >= 2_000);
        assert!(clock.uptime_ms() >= 2);
    }
}
