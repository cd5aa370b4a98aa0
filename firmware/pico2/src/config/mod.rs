//! Firmware configuration.
//!
//! - `serial`: Trace UART baud rate (feature-selected) and link throughput
//! - `timing`: Main loop, sampling and report periods

pub mod serial;
pub mod timing;

// Re-export at config level for convenience
pub use serial::{BAUD_RATE, BYTES_PER_SECOND, transmit_time_ms};
pub use timing::{
    BUTTON_DEBOUNCE_MS,
    HEARTBEAT_PERIOD_MS,
    LOOP_PERIOD_MS,
    REPORT_PERIOD_US,
    REPORT_POLL_MS,
    SENSOR_PERIOD_MS,
};
