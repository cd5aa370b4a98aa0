//! Report task: the only code that prints to the trace UART after boot.
//!
//! Polls the shared event timer and prints a report whenever the report
//! period has elapsed. Also emits a periodic heartbeat trace line carrying
//! the report counters.

use defmt::info;
use embassy_time::{Duration, Instant, Ticker};
use evtrace_common::{ReportOutcome, trace_fmt};
use evtrace_pico2::Event;
use evtrace_pico2::config::{HEARTBEAT_PERIOD_MS, REPORT_PERIOD_US, REPORT_POLL_MS};

use crate::{TIMER, TraceOut};

/// Print rate-limited event reports and heartbeats.
#[embassy_executor::task]
pub async fn report_task(channel: &'static mut TraceOut) {
    info!("Report task started");

    let mut ticker = Ticker::every(Duration::from_millis(REPORT_POLL_MS));
    let mut last_heartbeat = Instant::now();
    let mut reports = 0u32;
    let mut rows = 0u32;

    loop {
        ticker.next().await;

        match TIMER.report_by_period(REPORT_PERIOD_US, &mut *channel) {
            Some(ReportOutcome::Printed(n)) => {
                reports = reports.wrapping_add(1);
                rows = rows.wrapping_add(n as u32);
                // Opens the next report, showing how long printing took
                TIMER.register_event(Event::Report.kind());
            }
            Some(ReportOutcome::Empty) => reports = reports.wrapping_add(1),
            None => {}
        }

        if last_heartbeat.elapsed() >= Duration::from_millis(HEARTBEAT_PERIOD_MS) {
            last_heartbeat = Instant::now();
            trace_fmt!(channel, "alive: {} reports, {} rows", reports, rows);
        }
    }
}
