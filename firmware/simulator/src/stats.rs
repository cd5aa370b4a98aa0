//! Run statistics for the simulator.
//!
//! Counts how many registrations and reports went through and how many were
//! dropped because the event timer was busy. Shared between the main loop
//! and the interrupt thread, hence atomics.

use std::sync::atomic::{AtomicU32, Ordering};

use evtrace_common::ReportOutcome;

/// Registration and report counters.
#[derive(Default)]
pub struct RunStats {
    registered: AtomicU32,
    dropped: AtomicU32,
    reports: AtomicU32,
    rows: AtomicU32,
}

impl RunStats {
    /// Create zeroed counters.
    pub const fn new() -> Self {
        Self {
            registered: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            reports: AtomicU32::new(0),
            rows: AtomicU32::new(0),
        }
    }

    /// Count the result of a `register_event` call.
    pub fn registration(
        &self,
        recorded: bool,
    ) {
        let counter = if recorded { &self.registered } else { &self.dropped };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count the result of a report call (`None` = skipped or dropped).
    pub fn report(
        &self,
        outcome: Option<ReportOutcome>,
    ) {
        match outcome {
            Some(ReportOutcome::Printed(rows)) => {
                self.reports.fetch_add(1, Ordering::Relaxed);
                self.rows.fetch_add(rows as u32, Ordering::Relaxed);
            }
            Some(ReportOutcome::Empty) => {
                self.reports.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }
    }

    /// Registrations dropped on contention, as a percentage of attempts.
    pub fn drop_percent(&self) -> f32 {
        let registered = self.registered.load(Ordering::Relaxed);
        let dropped = self.dropped.load(Ordering::Relaxed);
        let attempts = registered + dropped;
        if attempts == 0 {
            0.0
        } else {
            dropped as f32 * 100.0 / attempts as f32
        }
    }

    /// One-line summary for the end of the run.
    pub fn summary(&self) -> String {
        format!(
            "registered={} dropped={} ({:.2}%) reports={} rows={}",
            self.registered.load(Ordering::Relaxed),
            self.dropped.load(Ordering::Relaxed),
            self.drop_percent(),
            self.reports.load(Ordering::Relaxed),
            self.rows.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_percent() {
        let stats = RunStats::new();
        assert_eq!(stats.drop_percent(), 0.0);

        for _ in 0..3 {
            stats.registration(true);
        }
        stats.registration(false);
        assert_eq!(stats.drop_percent(), 25.0);
    }

    #[test]
    fn test_report_counters() {
        let stats = RunStats::new();
        stats.report(Some(ReportOutcome::Printed(4)));
        stats.report(Some(ReportOutcome::Empty));
        stats.report(None);
        assert_eq!(stats.summary(), "registered=0 dropped=0 (0.00%) reports=2 rows=4");
    }
}
