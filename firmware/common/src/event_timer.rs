//! Event Timer: a fixed-capacity log of timestamped events.
//!
//! Foreground and interrupt code register `(kind, timestamp)` pairs cheaply;
//! foreground code periodically prints the log as a table of absolute
//! timestamps and inter-event deltas, which also drains it.
//!
//! # Report format
//!
//! ```text
//! ------------+------------+----------
//!       1.000 |            | loop start
//!       1.004 |      0.004 | sensor ready
//!       1.010 |      0.006 | [7]
//! ------------+------------+----------
//! ```
//!
//! An empty log prints a single `.` line instead.
//!
//! # Overflow Handling
//!
//! The log is lossy: once all slots are used, each registration overwrites
//! the oldest record. Deltas use `wrapping_sub`, so a sequence that crosses
//! the tick counter's wrap still shows small positive deltas.
//!
//! This type has no locking of its own; it is driven through `&mut self`.
//! [`crate::shared::SharedEventTimer`] adds the interrupt-safe try-lock.

use core::fmt::Write;
use core::num::NonZeroU8;

use crate::config::{EV_BUFFER_SIZE, EV_MAX_KINDS, REPORT_COLUMN_WIDTH, REPORT_EMPTY, REPORT_SEPARATOR};
use crate::format::{ReportStyle, TickValue};

// =============================================================================
// Event Kind
// =============================================================================

/// Category of an instrumented occurrence.
///
/// Kind `0` is the empty-slot marker of the log and cannot be constructed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventKind(NonZeroU8);

impl EventKind {
    /// Create a kind, rejecting the reserved value `0`.
    #[inline]
    pub const fn new(kind: u8) -> Option<Self> {
        match NonZeroU8::new(kind) {
            Some(k) => Some(Self(k)),
            None => None,
        }
    }

    /// Create a kind in a const item; `0` fails the build.
    pub const fn from_const(kind: u8) -> Self {
        match NonZeroU8::new(kind) {
            Some(k) => Self(k),
            None => panic!("event kind 0 is reserved for empty slots"),
        }
    }

    /// Numeric value (never 0).
    #[inline]
    pub const fn get(self) -> u8 { self.0.get() }
}

impl From<NonZeroU8> for EventKind {
    fn from(kind: NonZeroU8) -> Self { Self(kind) }
}

/// A registered event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EventRecord {
    /// What happened.
    pub kind: EventKind,
    /// Tick count when it happened.
    pub timestamp: u32,
}

// =============================================================================
// Event Log (ring buffer)
// =============================================================================

/// Fixed-capacity ring of event records, overwriting the oldest when full.
///
/// `cursor` always points at the next slot to write, which is also the
/// oldest slot once the ring has wrapped. Iteration therefore starts there.
pub struct EventLog<const N: usize = EV_BUFFER_SIZE> {
    slots: [Option<EventRecord>; N],
    cursor: usize,
    len: usize,
}

impl<const N: usize> EventLog<N> {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            cursor: 0,
            len: 0,
        }
    }

    /// Store a record in the cursor slot and advance the cursor.
    pub fn push(
        &mut self,
        record: EventRecord,
    ) {
        if self.slots[self.cursor].is_none() {
            self.len += 1;
        }
        self.slots[self.cursor] = Some(record);
        self.cursor = (self.cursor + 1) % N;
    }

    /// Mark every slot empty. The cursor is left where it is.
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.len = 0;
    }

    /// Number of live records.
    #[inline]
    pub const fn len(&self) -> usize { self.len }

    /// Check if no records are live.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize { N }

    /// Index of the next slot to be written.
    #[inline]
    pub const fn cursor(&self) -> usize { self.cursor }

    /// Iterate over live records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> + '_ {
        let (newer, older) = self.slots.split_at(self.cursor);
        older.iter().chain(newer.iter()).flatten()
    }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Label Table
// =============================================================================

/// Display names for event kinds `1..K`.
///
/// Labels are borrowed, never copied: the text must outlive the table, which
/// in practice means `'static` string literals.
pub struct LabelTable<'a, const K: usize = EV_MAX_KINDS> {
    labels: [Option<&'a str>; K],
}

impl<'a, const K: usize> LabelTable<'a, K> {
    /// Create a table with no labels bound.
    pub const fn new() -> Self { Self { labels: [None; K] } }

    /// Bind `text` to `kind`. Ignored if `kind` is 0 or `>= K`.
    pub fn set(
        &mut self,
        kind: u8,
        text: &'a str,
    ) {
        let idx = usize::from(kind);
        if idx == 0 || idx >= K {
            return;
        }
        self.labels[idx] = Some(text);
    }

    /// Bind `texts[i]` to kind `i` for every `i >= 1`. Entry 0 is skipped.
    pub fn set_all(
        &mut self,
        texts: &[&'a str],
    ) {
        for (idx, text) in texts.iter().enumerate().skip(1).take(K.saturating_sub(1)) {
            self.labels[idx] = Some(*text);
        }
    }

    /// Label bound to `kind`, if any.
    #[inline]
    pub fn get(
        &self,
        kind: EventKind,
    ) -> Option<&'a str> {
        self.labels.get(usize::from(kind.get())).copied().flatten()
    }
}

impl<const K: usize> Default for LabelTable<'_, K> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Event Timer
// =============================================================================

/// What a report call printed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportOutcome {
    /// The log was empty; only the placeholder line was printed.
    Empty,
    /// A table with this many rows was printed and the log drained.
    Printed(usize),
}

/// Event log, label table and report state for one profiled subsystem.
pub struct EventTimer<'a, const N: usize = EV_BUFFER_SIZE, const K: usize = EV_MAX_KINDS> {
    log: EventLog<N>,
    labels: LabelTable<'a, K>,
    style: ReportStyle,
    last_report: Option<u32>,
}

impl<'a, const N: usize, const K: usize> EventTimer<'a, N, K> {
    /// Create a timer with an empty log and no labels.
    pub const fn new(style: ReportStyle) -> Self {
        Self {
            log: EventLog::new(),
            labels: LabelTable::new(),
            style,
            last_report: None,
        }
    }

    /// Bind a display label to an event kind. Out-of-range kinds are ignored.
    #[inline]
    pub fn set_label(
        &mut self,
        kind: u8,
        text: &'a str,
    ) {
        self.labels.set(kind, text);
    }

    /// Bind `texts[i]` to kind `i` for `i` in `1..texts.len()`.
    #[inline]
    pub fn set_all_labels(
        &mut self,
        texts: &[&'a str],
    ) {
        self.labels.set_all(texts);
    }

    /// Label bound to `kind`, if any.
    #[inline]
    pub fn label(
        &self,
        kind: EventKind,
    ) -> Option<&'a str> {
        self.labels.get(kind)
    }

    /// Append an event. Overwrites the oldest record when the log is full.
    #[inline]
    pub fn record(
        &mut self,
        kind: EventKind,
        timestamp: u32,
    ) {
        self.log.push(EventRecord { kind, timestamp });
    }

    /// Read access to the log.
    #[inline]
    pub const fn log(&self) -> &EventLog<N> { &self.log }

    /// Current report style.
    #[inline]
    pub const fn style(&self) -> ReportStyle { self.style }

    /// Change how timestamps are printed.
    #[inline]
    pub fn set_style(
        &mut self,
        style: ReportStyle,
    ) {
        self.style = style;
    }

    /// Print every live record oldest first, then drain the log.
    ///
    /// Write errors from `out` are ignored: the output channel is
    /// append-only and has nothing to recover.
    pub fn report<W: Write>(
        &mut self,
        out: &mut W,
    ) -> ReportOutcome {
        if self.log.is_empty() {
            out.write_str(REPORT_EMPTY).ok();
            return ReportOutcome::Empty;
        }

        out.write_str(REPORT_SEPARATOR).ok();

        let mut previous: Option<u32> = None;
        let mut rows = 0;
        for record in self.log.records() {
            write_row(out, record, previous, &self.labels, self.style);
            previous = Some(record.timestamp);
            rows += 1;
        }

        out.write_str(REPORT_SEPARATOR).ok();
        self.log.clear();
        ReportOutcome::Printed(rows)
    }

    /// Report only if `period` ticks have passed since the last report made
    /// through this method. The first call always reports.
    ///
    /// Returns `None` when skipped.
    pub fn report_if_due<W: Write>(
        &mut self,
        now: u32,
        period: u32,
        out: &mut W,
    ) -> Option<ReportOutcome> {
        if let Some(last) = self.last_report
            && now.wrapping_sub(last) < period
        {
            return None;
        }
        self.last_report = Some(now);
        Some(self.report(out))
    }
}

impl<const N: usize, const K: usize> Default for EventTimer<'_, N, K> {
    fn default() -> Self { Self::new(ReportStyle::default()) }
}

/// Print one report row: timestamp, delta from `previous`, label.
fn write_row<W: Write, const K: usize>(
    out: &mut W,
    record: &EventRecord,
    previous: Option<u32>,
    labels: &LabelTable<'_, K>,
    style: ReportStyle,
) {
    let timestamp = TickValue {
        ticks: record.timestamp,
        style,
    };
    match previous {
        Some(prev) => {
            let delta = TickValue {
                ticks: record.timestamp.wrapping_sub(prev),
                style,
            };
            write!(out, "{timestamp:>w$} |{delta:>w$} | ", w = REPORT_COLUMN_WIDTH).ok();
        }
        None => {
            write!(out, "{timestamp:>w$} |{:w$} | ", "", w = REPORT_COLUMN_WIDTH).ok();
        }
    }
    match labels.get(record.kind) {
        Some(label) => out.write_str(label).ok(),
        None => write!(out, "[{}]", record.kind.get()).ok(),
    };
    out.write_char('\n').ok();
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(k: u8) -> EventKind { EventKind::new(k).unwrap() }

    /// Timer printing raw ticks, so expected deltas are plain numbers.
    fn raw_timer<'a, const N: usize>() -> EventTimer<'a, N, EV_MAX_KINDS> { EventTimer::new(ReportStyle::Ticks) }

    /// Split a report into its data rows (separators removed).
    fn rows(report: &str) -> Vec<&str> {
        report
            .lines()
            .filter(|l| *l != REPORT_SEPARATOR.trim_end())
            .collect()
    }

    #[test]
    fn test_kind_zero_rejected() {
        assert!(EventKind::new(0).is_none());
        assert_eq!(EventKind::new(5).map(EventKind::get), Some(5));
    }

    #[test]
    fn test_log_push_and_records_order() {
        let mut log: EventLog<4> = EventLog::new();
        assert!(log.is_empty());

        for t in 1..=3 {
            log.push(EventRecord {
                kind: kind(t as u8),
                timestamp: t * 10,
            });
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 3);

        let ts: Vec<u32> = log.records().map(|r| r.timestamp).collect();
        assert_eq!(ts, [10, 20, 30]);
    }

    #[test]
    fn test_log_overwrites_oldest() {
        let mut log: EventLog<3> = EventLog::new();
        for t in 1..=5 {
            log.push(EventRecord {
                kind: kind(1),
                timestamp: t,
            });
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 2);

        let ts: Vec<u32> = log.records().map(|r| r.timestamp).collect();
        assert_eq!(ts, [3, 4, 5]);
    }

    #[test]
    fn test_log_clear_keeps_cursor() {
        let mut log: EventLog<4> = EventLog::new();
        log.push(EventRecord {
            kind: kind(1),
            timestamp: 1,
        });
        log.push(EventRecord {
            kind: kind(1),
            timestamp: 2,
        });
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.cursor(), 2);
        assert_eq!(log.records().count(), 0);

        // Next record after a drain lands at the old cursor
        log.push(EventRecord {
            kind: kind(2),
            timestamp: 3,
        });
        assert_eq!(log.cursor(), 3);
        assert_eq!(log.records().map(|r| r.timestamp).collect::<Vec<_>>(), [3]);
    }

    #[test]
    fn test_label_table_bounds() {
        let mut labels: LabelTable<'static, 4> = LabelTable::new();
        labels.set(0, "zero");
        labels.set(3, "three");
        labels.set(4, "out of range");
        labels.set(200, "way out");

        assert_eq!(labels.get(kind(3)), Some("three"));
        assert_eq!(labels.get(kind(4)), None);
        assert_eq!(labels.get(kind(200)), None);
    }

    #[test]
    fn test_label_table_set_all_skips_zero() {
        let mut labels: LabelTable<'static, 3> = LabelTable::new();
        labels.set_all(&["ignored", "one", "two", "three"]);
        assert_eq!(labels.get(kind(1)), Some("one"));
        assert_eq!(labels.get(kind(2)), Some("two"));
        // Table only has kinds 1..3
        assert_eq!(labels.get(kind(3)), None);
    }

    #[test]
    fn test_report_rows_in_order_with_deltas() {
        let mut timer = raw_timer::<8>();
        timer.record(kind(1), 100);
        timer.record(kind(2), 150);
        timer.record(kind(3), 175);

        let mut out = String::new();
        assert_eq!(timer.report(&mut out), ReportOutcome::Printed(3));

        let expected = "\
------------+------------+----------
        100 |            | [1]
        150 |         50 | [2]
        175 |         25 | [3]
------------+------------+----------
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_report_uses_labels() {
        let mut timer = raw_timer::<8>();
        timer.set_label(1, "loop start");
        timer.record(kind(1), 10);
        timer.record(kind(9), 12);

        let mut out = String::new();
        timer.report(&mut out);
        let rows = rows(&out);
        assert!(rows[0].ends_with("| loop start"));
        assert!(rows[1].ends_with("| [9]"));
    }

    #[test]
    fn test_report_seconds_style() {
        let mut timer: EventTimer<'_, 4> = EventTimer::new(ReportStyle::Seconds(crate::time::TickUnit::Micros));
        timer.record(kind(1), 1_000_000);
        timer.record(kind(1), 1_004_000);

        let mut out = String::new();
        timer.report(&mut out);
        let rows = rows(&out);
        assert_eq!(rows[0], "      1.000 |            | [1]");
        assert_eq!(rows[1], "      1.004 |      0.004 | [1]");
    }

    #[test]
    fn test_report_after_overflow_shows_latest() {
        let mut timer = raw_timer::<4>();
        for t in 1..=6u32 {
            timer.record(kind(t as u8), t);
        }

        let mut out = String::new();
        assert_eq!(timer.report(&mut out), ReportOutcome::Printed(4));
        let rows = rows(&out);
        assert!(rows[0].ends_with("| [3]"));
        assert!(rows[3].ends_with("| [6]"));
    }

    #[test]
    fn test_report_exactly_full_then_wrapped() {
        let mut timer = raw_timer::<3>();
        for t in 1..=3u32 {
            timer.record(kind(t as u8), t * 10);
        }

        // Exactly capacity: nothing evicted
        let mut out = String::new();
        assert_eq!(timer.report(&mut out), ReportOutcome::Printed(3));
        assert_eq!(
            rows(&out),
            [
                "         10 |            | [1]",
                "         20 |         10 | [2]",
                "         30 |         10 | [3]",
            ]
        );
        assert_eq!(timer.log().cursor(), 0);

        // Five more into three slots: the first two are evicted
        for t in 4..=8u32 {
            timer.record(kind(t as u8), t * 10);
        }
        out.clear();
        assert_eq!(timer.report(&mut out), ReportOutcome::Printed(3));
        assert_eq!(
            rows(&out),
            [
                "         60 |            | [6]",
                "         70 |         10 | [7]",
                "         80 |         10 | [8]",
            ]
        );
    }

    #[test]
    fn test_report_empty_prints_placeholder() {
        let mut timer = raw_timer::<4>();
        let mut out = String::new();
        assert_eq!(timer.report(&mut out), ReportOutcome::Empty);
        assert_eq!(out, ".\n");
    }

    #[test]
    fn test_report_drains() {
        let mut timer = raw_timer::<4>();
        timer.record(kind(1), 1);

        let mut out = String::new();
        timer.report(&mut out);

        out.clear();
        assert_eq!(timer.report(&mut out), ReportOutcome::Empty);
        assert_eq!(out, ".\n");
    }

    #[test]
    fn test_report_delta_across_wrap() {
        let mut timer = raw_timer::<4>();
        timer.record(kind(1), u32::MAX - 9);
        timer.record(kind(2), 5);

        let mut out = String::new();
        timer.report(&mut out);
        let rows = rows(&out);
        assert!(rows[1].starts_with("          5 |         15 |"));
    }

    #[test]
    fn test_report_if_due() {
        let mut timer = raw_timer::<4>();
        let mut out = String::new();

        // First call always reports
        assert_eq!(timer.report_if_due(1_000, 500, &mut out), Some(ReportOutcome::Empty));
        // Too soon
        assert_eq!(timer.report_if_due(1_499, 500, &mut out), None);
        // Exactly one period later
        assert_eq!(timer.report_if_due(1_500, 500, &mut out), Some(ReportOutcome::Empty));
        assert_eq!(out, ".\n.\n");
    }

    #[test]
    fn test_report_if_due_across_wrap() {
        let mut timer = raw_timer::<4>();
        let mut out = String::new();

        assert!(timer.report_if_due(u32::MAX - 100, 500, &mut out).is_some());
        assert!(timer.report_if_due(200, 500, &mut out).is_none());
        assert!(timer.report_if_due(400, 500, &mut out).is_some());
    }
}
