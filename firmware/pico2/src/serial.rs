//! Trace output over UART0.
//!
//! Pin mapping:
//! - TX: GPIO0 (UART0 TX)
//!
//! Writes are blocking: at 9600 baud each byte holds the CPU for ~1 ms, so
//! only the foreground report task prints. Interrupt-side code registers
//! events instead.

use core::fmt;

use defmt::{info, warn};
use embassy_rp::uart::{Blocking, UartTx};
use evtrace_common::OutputChannel;
use evtrace_pico2::config::BAUD_RATE;

/// Blocking UART transmitter used as the trace output channel.
pub struct UartChannel {
    tx: UartTx<'static, Blocking>,
    /// Bytes sent since the channel was opened.
    bytes_sent: u32,
}

impl UartChannel {
    /// Wrap a configured UART transmitter.
    pub const fn new(tx: UartTx<'static, Blocking>) -> Self { Self { tx, bytes_sent: 0 } }
}

impl fmt::Write for UartChannel {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.tx.blocking_write(s.as_bytes()).map_err(|_| fmt::Error)?;
        self.bytes_sent = self.bytes_sent.wrapping_add(s.len() as u32);
        Ok(())
    }
}

impl OutputChannel for UartChannel {
    fn open(&mut self) {
        info!("Trace UART open at {} baud", BAUD_RATE);
        self.bytes_sent = 0;
        // Start on a fresh terminal line, whatever the host saw before reset
        if self.tx.blocking_write(b"\r\n").is_err() {
            warn!("Trace UART write failed on open");
        }
    }

    fn close(&mut self) {
        self.tx.blocking_flush().ok();
        info!("Trace UART closed after {} bytes", self.bytes_sent);
    }
}
