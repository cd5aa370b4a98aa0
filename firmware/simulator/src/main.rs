//! Event trace simulator for Windows/Linux/macOS.
//!
//! Runs the firmware's instrumentation on the desktop: the main loop
//! registers loop and sensor-poll events, a background thread stands in for
//! the data-ready interrupt, and reports go to stdout throttled to the
//! firmware's UART rate.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod clock;
mod stats;
mod stdout;
mod timing;

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use evtrace_common::{ReportOutcome, SharedEventTimer, TimeSource, TraceChannel, trace_assert, trace_fmt, trace_line};
use evtrace_pico2::config::REPORT_PERIOD_US;
use evtrace_pico2::{EVENT_LABELS, Event};

use crate::clock::StdClock;
use crate::stats::RunStats;
use crate::stdout::SerialStdout;
use crate::timing::{LOOP_PERIOD, RUN_DURATION, SENSOR_PERIOD, WORK_TIME};

// Links the std critical-section implementation used by embassy-sync
use critical_section as _;

/// Event timer shared by the main loop and the interrupt thread.
static TIMER: SharedEventTimer<'static, StdClock> = SharedEventTimer::new(StdClock);

/// Registration and report counters.
static STATS: RunStats = RunStats::new();

fn main() {
    let mut channel = TraceChannel::new(SerialStdout::new(true), StdClock);

    trace_assert!(channel, TIMER.set_all_labels(&EVENT_LABELS));
    trace_fmt!(channel, "simulating {} s, report every {} ms", RUN_DURATION.as_secs(), REPORT_PERIOD_US / 1000);

    // Stand-in for the data-ready interrupt: preempts at arbitrary points
    let running = AtomicBool::new(true);
    thread::scope(|s| {
        s.spawn(|| {
            while running.load(Ordering::Relaxed) {
                STATS.registration(TIMER.register_event(Event::SensorReady.kind()));
                thread::sleep(SENSOR_PERIOD);
            }
        });

        let start = Instant::now();
        while start.elapsed() < RUN_DURATION {
            let loop_start = Instant::now();

            STATS.registration(TIMER.register_event(Event::LoopStart.kind()));
            STATS.registration(TIMER.register_event(Event::SensorPoll.kind()));
            thread::sleep(WORK_TIME);
            STATS.registration(TIMER.register_event(Event::LoopEnd.kind()));

            periodic_report(&TIMER, &mut channel, &STATS);

            if let Some(rest) = LOOP_PERIOD.checked_sub(loop_start.elapsed()) {
                thread::sleep(rest);
            }
        }
        running.store(false, Ordering::Relaxed);
    });

    // Whatever is left since the last periodic report
    STATS.report(TIMER.report(&mut channel));
    trace_line!(channel, "simulation finished");
    channel.close();

    println!("{}", STATS.summary());
}

/// Print a report if one is due and count it.
///
/// A printed report opens the next one with a `Report` event, like the
/// firmware's report task.
fn periodic_report<C: TimeSource, W: Write>(
    timer: &SharedEventTimer<'_, C>,
    out: &mut W,
    stats: &RunStats,
) -> Option<ReportOutcome> {
    let outcome = timer.report_by_period(REPORT_PERIOD_US, out);
    if let Some(ReportOutcome::Printed(_)) = outcome {
        stats.registration(timer.register_event(Event::Report.kind()));
    }
    stats.report(outcome);
    outcome
}

// =============================================================================
// Tests
// =============================================================================
