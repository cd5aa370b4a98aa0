//! Event trace firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Instruments a fixed-period main loop, a simulated sensor and a button with
//! the event timer, and prints latency reports over UART0.
//!
//! # Architecture
//!
//! - Main task: boot trace lines, then the instrumented loop (registers only)
//! - Sensor task: registers "sensor ready" on its own period
//! - Button task: registers debounced presses
//! - Report task: owns the trace channel, prints reports at most every 5 s
//!
//! Registrations never block: if the timer is busy (a report is being
//! printed), the event is dropped.
//!
//! # Wiring
//!
//! - **GPIO0**: Trace UART TX (connect to a USB-serial adapter RX)
//! - **GPIO12**: Button to GND (internal pull-up)

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod clock;
#[cfg(target_arch = "arm")]
mod serial;
#[cfg(target_arch = "arm")]
mod tasks;

#[cfg(target_arch = "arm")]
use {
    crate::clock::EmbassyClock,
    crate::serial::UartChannel,
    crate::tasks::{button_task, report_task, sensor_task},
    defmt::info,
    defmt_rtt as _,
    embassy_executor::Spawner,
    embassy_rp::gpio::{Input, Pull},
    embassy_rp::uart::{self, UartTx},
    embassy_time::{Duration, Ticker},
    evtrace_common::{SharedEventTimer, TraceChannel, trace_assert, trace_fmt, trace_hex, trace_line},
    evtrace_pico2::config::{BAUD_RATE, LOOP_PERIOD_MS, REPORT_PERIOD_US},
    evtrace_pico2::{EVENT_LABELS, Event},
    panic_probe as _,
    static_cell::StaticCell,
};

/// Trace output: UART0 with embassy uptime prefixes.
#[cfg(target_arch = "arm")]
pub type TraceOut = TraceChannel<UartChannel, EmbassyClock>;

/// Event timer shared by every task. Registration is safe from any context.
#[cfg(target_arch = "arm")]
pub static TIMER: SharedEventTimer<'static, EmbassyClock> = SharedEventTimer::new(EmbassyClock);

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-evtrace"),
    embassy_rp::binary_info::rp_program_description!(c"Event timing traces over UART0"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Event trace firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Trace UART (TX only, nothing is ever read back)
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = BAUD_RATE;
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // Move the channel to static for the report task (Embassy tasks need 'static lifetime)
    static CHANNEL: StaticCell<TraceOut> = StaticCell::new();
    let channel: &'static mut TraceOut = CHANNEL.init(TraceChannel::new(UartChannel::new(tx), EmbassyClock));

    // Nothing else runs yet, so binding labels cannot be dropped
    trace_assert!(channel, TIMER.set_all_labels(&EVENT_LABELS));
    trace_fmt!(channel, "event trace ready, {} baud, report every {} ms", BAUD_RATE, REPORT_PERIOD_US / 1000);
    trace_hex!(channel, "baud", &BAUD_RATE.to_le_bytes());

    let button = Input::new(p.PIN_12, Pull::Up);
    spawner.spawn(button_task(button)).unwrap();
    spawner.spawn(sensor_task()).unwrap();

    trace_line!(channel, "handing channel to report task");
    spawner.spawn(report_task(channel)).unwrap();
    info!("Tasks spawned");

    // Instrumented main loop: registrations only, printing happens elsewhere
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));
    let mut iterations = 0u32;
    loop {
        TIMER.register_event(Event::LoopStart.kind());

        TIMER.register_event(Event::SensorPoll.kind());
        iterations = iterations.wrapping_add(1);

        TIMER.register_event(Event::LoopEnd.kind());

        if iterations.is_multiple_of(1000) {
            info!("Main loop: {} iterations", iterations);
        }
        ticker.next().await;
    }
}

/// Host builds only get this stub; run the simulator instead.
#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("pico2 firmware targets thumbv8m.main-none-eabihf; use `cargo run -p evtrace-simulator` on the host");
}
