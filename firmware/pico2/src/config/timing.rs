//! Loop, sampling and report timing.

// =============================================================================
// Main Loop
// =============================================================================

/// Main loop period. Each iteration registers a start and an end event.
pub const LOOP_PERIOD_MS: u64 = 20;

/// Simulated sensor data-ready period (deliberately not a multiple of the loop).
pub const SENSOR_PERIOD_MS: u64 = 7;

/// Ignore button edges closer together than this.
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// =============================================================================
// Reporting
// =============================================================================

/// Minimum time between two event reports, in microsecond ticks.
pub const REPORT_PERIOD_US: u32 = 5_000_000;

/// How often the report task checks whether a report is due.
pub const REPORT_POLL_MS: u64 = 250;

/// Interval between heartbeat trace lines.
pub const HEARTBEAT_PERIOD_MS: u64 = 10_000;
