//! Event trace firmware library - testable modules for the Pico 2 firmware.
//!
//! This library contains the configuration and event catalogue that can be
//! tested on the host machine. The binary (`main.rs`) uses this library and
//! adds the embedded-specific code (UART channel, embassy clock, tasks).
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p evtrace-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p evtrace-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod events;

pub use events::{EVENT_LABELS, Event};
