//! Sensor task: simulated data-ready signal.
//!
//! Runs on a period that drifts against the main loop, so reports show
//! sensor events interleaved at varying offsets from loop start.

use defmt::info;
use embassy_time::{Duration, Ticker};
use evtrace_pico2::Event;
use evtrace_pico2::config::SENSOR_PERIOD_MS;

use crate::TIMER;

/// Register a "sensor ready" event every `SENSOR_PERIOD_MS`.
#[embassy_executor::task]
pub async fn sensor_task() {
    info!("Sensor task started");

    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_PERIOD_MS));
    loop {
        ticker.next().await;
        TIMER.register_event(Event::SensorReady.kind());
    }
}
