//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the firmware crate.

use std::time::Duration;

use evtrace_pico2::config::{LOOP_PERIOD_MS, SENSOR_PERIOD_MS};

/// Total simulated run time.
pub const RUN_DURATION: Duration = Duration::from_secs(20);

/// Main loop period (same as the firmware).
pub const LOOP_PERIOD: Duration = Duration::from_millis(LOOP_PERIOD_MS);

/// Period of the simulated data-ready interrupt (same as the firmware).
pub const SENSOR_PERIOD: Duration = Duration::from_millis(SENSOR_PERIOD_MS);

/// Simulated work between "sensor poll" and "loop end".
pub const WORK_TIME: Duration = Duration::from_millis(3);
