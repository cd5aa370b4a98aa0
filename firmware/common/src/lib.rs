//! On-device trace output and event timing.
//!
//! This crate contains the platform-agnostic code shared between the
//! simulator and the Pico 2 firmware:
//!
//! - [`channel`]: Line Formatter, prefixed trace lines on an output channel
//! - [`event_timer`]: fixed-capacity event log with delta reports
//! - [`shared`]: interrupt-safe, drop-on-contention wrapper for the event timer
//! - [`format`]: tag trimming, hex dumps, truncating writers
//! - [`time`]: tick source abstraction
//! - [`config`]: buffer sizes and report layout constants
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and allocation-free. Platform pieces (UART, clocks)
//! plug in through [`channel::OutputChannel`] and [`time::TimeSource`].
//!
//! # Testing
//!
//! ```bash
//! cargo test -p evtrace-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod channel;
pub mod config;
pub mod event_timer;
pub mod format;
pub mod shared;
pub mod time;

mod macros;

// Re-export commonly used items
pub use channel::{OutputChannel, TraceChannel, halt};
pub use event_timer::{EventKind, EventRecord, EventTimer, ReportOutcome};
pub use format::ReportStyle;
pub use shared::SharedEventTimer;
pub use time::{ManualClock, TickUnit, TimeSource};

// Host tests need a critical-section implementation for embassy-sync
#[cfg(test)]
use critical_section as _;
