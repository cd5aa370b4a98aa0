//! Button task: registers a debounced press event.
//!
//! The GPIO edge interrupt wakes this task, which then runs on the same
//! thread-mode executor as the report task. It only registers an event and
//! never prints.

use defmt::info;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};
use evtrace_pico2::Event;
use evtrace_pico2::config::BUTTON_DEBOUNCE_MS;

use crate::TIMER;

/// Time-based debounce for an active-low button.
struct Debounce {
    last_press: Option<Instant>,
}

impl Debounce {
    const fn new() -> Self { Self { last_press: None } }

    /// Returns true if a falling edge at `now` is a new press rather than bounce.
    fn accept(
        &mut self,
        now: Instant,
    ) -> bool {
        if let Some(last) = self.last_press
            && now.duration_since(last) < Duration::from_millis(BUTTON_DEBOUNCE_MS)
        {
            return false;
        }
        self.last_press = Some(now);
        true
    }
}

/// Wait for presses and register each one.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    let mut debounce = Debounce::new();
    let mut dropped = 0u32;

    loop {
        button.wait_for_falling_edge().await;
        if !debounce.accept(Instant::now()) {
            continue;
        }

        if !TIMER.register_event(Event::ButtonPress.kind()) {
            dropped = dropped.wrapping_add(1);
            info!("Button press dropped (timer busy), {} so far", dropped);
        }
    }
}
