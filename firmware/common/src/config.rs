//! Compile-time configuration constants.
//!
//! Buffer sizes are chosen for a controller with a few KB of RAM: one event
//! timer with the default capacity costs `EV_BUFFER_SIZE * 8` bytes of records
//! plus `EV_MAX_KINDS` label references.

// =============================================================================
// Event Timer
// =============================================================================

/// Number of event slots in the ring buffer.
/// Once full, each new registration overwrites the oldest record.
pub const EV_BUFFER_SIZE: usize = 60;

/// Size of the label table. Valid event kinds for labels are `1..EV_MAX_KINDS`.
pub const EV_MAX_KINDS: usize = 20;

/// Width of the timestamp and delta columns in a report.
pub const REPORT_COLUMN_WIDTH: usize = 11;

/// Separator printed before and after the rows of a report.
pub const REPORT_SEPARATOR: &str = "------------+------------+----------\n";

/// Printed instead of a table when no events were registered since the last drain.
pub const REPORT_EMPTY: &str = ".\n";

// =============================================================================
// Line Formatter
// =============================================================================

/// Size of the scratch buffer messages are rendered into.
/// Anything longer is truncated.
pub const SCRATCH_LEN: usize = 150;

/// Display width of the source tag column in a trace line prefix.
pub const TAG_WIDTH: usize = 13;

/// Minimum number of digits for the seconds part of a trace line timestamp.
pub const ELAPSED_SECONDS_DIGITS: usize = 5;
