//! Stdout output channel throttled to the firmware's UART rate.
//!
//! Sleeping for the wire time of every write makes reports take as long as
//! on the device, so the interrupt thread really collides with them.

use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use evtrace_common::OutputChannel;
use evtrace_pico2::config::BYTES_PER_SECOND;

/// Stdout sink emulating a serial link.
pub struct SerialStdout {
    out: io::Stdout,
    throttle: bool,
}

impl SerialStdout {
    /// Create a sink; `throttle` enables baud-rate emulation.
    pub fn new(throttle: bool) -> Self {
        Self {
            out: io::stdout(),
            throttle,
        }
    }
}

/// Time the firmware UART needs to send `bytes`.
pub fn wire_time(bytes: usize) -> Duration {
    Duration::from_micros(bytes as u64 * 1_000_000 / u64::from(BYTES_PER_SECOND))
}

impl fmt::Write for SerialStdout {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.out.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
        if self.throttle {
            self.out.flush().map_err(|_| fmt::Error)?;
            thread::sleep(wire_time(s.len()));
        }
        Ok(())
    }
}

impl OutputChannel for SerialStdout {
    fn open(&mut self) {
        eprintln!("[sim] serial channel open ({} bytes/s)", BYTES_PER_SECOND);
    }

    fn close(&mut self) {
        self.out.flush().ok();
        eprintln!("[sim] serial channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_time() {
        assert_eq!(wire_time(0), Duration::ZERO);
        assert_eq!(wire_time(BYTES_PER_SECOND as usize), Duration::from_secs(1));
    }
}
