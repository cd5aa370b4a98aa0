//! Line Formatter: prefixed trace lines on a slow output channel.
//!
//! Every line looks like:
//!
//! ```text
//! [00012.345] [uart_rx      ] frame received
//! ```
//!
//! `TraceChannel` is the one process-wide piece of output state: it owns the
//! sink, the clock used for prefixes, the scratch buffer messages are rendered
//! into, and the "channel opened" flag. Construct it once at startup and pass
//! it by `&mut` to whoever prints.
//!
//! # Context
//!
//! Foreground only. The scratch buffer and the sink are not guarded against
//! preemption, so interrupt handlers must never print. They register events
//! on a [`crate::shared::SharedEventTimer`] instead.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{SCRATCH_LEN, TAG_WIDTH};
use crate::format::{Elapsed, TruncatingWriter, push_hex, render_truncated, trim_source_tag};
use crate::time::TimeSource;

/// Append-only text sink (serial port, RTT channel, stdout).
pub trait OutputChannel: Write {
    /// Bring the channel up. Called once before the first write.
    fn open(&mut self) {}

    /// Release the channel. A later write reopens it.
    fn close(&mut self) {}
}

/// Process-wide trace output state.
pub struct TraceChannel<S, C> {
    sink: S,
    clock: C,
    scratch: String<SCRATCH_LEN>,
    opened: bool,
}

impl<S: OutputChannel, C: TimeSource> TraceChannel<S, C> {
    /// Wrap a sink. The sink is not opened until first use.
    pub const fn new(
        sink: S,
        clock: C,
    ) -> Self {
        Self {
            sink,
            clock,
            scratch: String::new(),
            opened: false,
        }
    }

    /// Open the sink if it is not open yet. Cheap after the first call.
    #[inline]
    pub fn open(&mut self) {
        if !self.opened {
            self.sink.open();
            self.opened = true;
        }
    }

    /// Close the sink if it is open.
    pub fn close(&mut self) {
        if self.opened {
            self.sink.close();
            self.opened = false;
        }
    }

    /// Whether the sink is currently open.
    #[inline]
    pub const fn is_open(&self) -> bool { self.opened }

    /// The wrapped sink.
    #[inline]
    pub const fn sink(&self) -> &S { &self.sink }

    /// The clock used for line prefixes.
    #[inline]
    pub const fn clock(&self) -> &C { &self.clock }

    /// Print `message` with the standard prefix.
    ///
    /// Messages longer than the scratch buffer are truncated.
    pub fn write_line(
        &mut self,
        source: &str,
        message: &str,
    ) {
        self.scratch.clear();
        TruncatingWriter::new(&mut self.scratch).write_str(message).ok();
        self.emit(source);
    }

    /// Print a formatted message with the standard prefix.
    ///
    /// Usually called through [`trace_fmt!`](crate::trace_fmt).
    pub fn write_fmt_line(
        &mut self,
        source: &str,
        args: fmt::Arguments<'_>,
    ) {
        render_truncated(&mut self.scratch, args);
        self.emit(source);
    }

    /// Print `<prefix> l=<len>: XX XX ...` with the standard prefix.
    ///
    /// Bytes that do not fit in the scratch buffer are left out.
    pub fn write_binary_line(
        &mut self,
        source: &str,
        prefix: &str,
        data: &[u8],
    ) {
        render_truncated(&mut self.scratch, format_args!("{} l={}:", prefix, data.len()));
        push_hex(&mut self.scratch, data);
        self.emit(source);
    }

    /// Halt the device if `condition` is false.
    ///
    /// Prints an "assertion failed" line, then spins forever. There is no
    /// unwinding and no way back; this is the fail-safe stop.
    pub fn assert_or_halt(
        &mut self,
        source: &str,
        line: u32,
        condition: bool,
    ) {
        if !condition {
            self.write_assert_failure(source, line);
            halt();
        }
    }

    /// Print the line `assert_or_halt` emits before halting.
    fn write_assert_failure(
        &mut self,
        source: &str,
        line: u32,
    ) {
        self.write_fmt_line(source, format_args!("assertion failed at line {line}"));
    }

    /// Write prefix, scratch contents and newline to the sink.
    fn emit(
        &mut self,
        source: &str,
    ) {
        self.open();
        let tag = trim_source_tag(source);
        let elapsed = Elapsed(self.clock.uptime_ms());
        write!(self.sink, "[{elapsed}] [{tag:<w$.w$}] ", w = TAG_WIDTH).ok();
        self.sink.write_str(&self.scratch).ok();
        self.sink.write_char('\n').ok();
    }
}

/// Raw pass-through, no prefix. Used for event reports.
impl<S: OutputChannel, C: TimeSource> Write for TraceChannel<S, C> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.open();
        self.sink.write_str(s)
    }
}

/// Stop forever. Interrupts keep running; this context never returns.
#[inline(never)]
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

// =============================================================================
// Tests
// =============================================================================
