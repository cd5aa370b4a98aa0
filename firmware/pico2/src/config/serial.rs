//! Trace UART configuration.
//!
//! The baud rate is selected at build time with a Cargo feature:
//!
//! | Feature       | Baud    | Full report (60 rows) |
//! |---------------|---------|-----------------------|
//! | *(none)*      | 9600    | ~2.6 s                |
//! | `baud-115200` | 115200  | ~0.2 s                |
//! | `baud-230400` | 230400  | ~0.1 s                |
//!
//! At the default rate a full report takes seconds, which is why reports are
//! rate-limited instead of printed every loop.

// Ensure only one baud profile is enabled at a time
#[cfg(all(feature = "baud-115200", feature = "baud-230400"))]
compile_error!("Only one baud feature can be enabled at a time. Choose one of: baud-115200, baud-230400");

/// Trace UART baud rate.
pub const BAUD_RATE: u32 = if cfg!(feature = "baud-230400") {
    230_400
} else if cfg!(feature = "baud-115200") {
    115_200
} else {
    9_600
};

/// Payload bytes per second on an 8N1 link (10 bits on the wire per byte).
pub const BYTES_PER_SECOND: u32 = BAUD_RATE / 10;

/// Time needed to push `bytes` through the trace UART, in milliseconds (rounded up).
pub const fn transmit_time_ms(bytes: u32) -> u32 { (bytes * 1000).div_ceil(BYTES_PER_SECOND) }
