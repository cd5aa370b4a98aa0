//! Async tasks for the trace firmware.
//!
//! This module contains Embassy async tasks that run concurrently:
//! - `button`: Debounced button presses, registered as events
//! - `sensor`: Simulated data-ready signal, registered as events
//! - `report`: Owns the trace channel, prints rate-limited event reports

pub mod button;
pub mod report;
pub mod sensor;

pub use button::button_task;
pub use report::report_task;
pub use sensor::sensor_task;
