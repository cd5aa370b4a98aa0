//! Text rendering helpers shared by the line formatter and event reports.
//!
//! All helpers write into fixed-capacity `heapless` buffers and truncate
//! instead of failing: output that does not fit is dropped silently, and the
//! buffer always holds valid UTF-8.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::ELAPSED_SECONDS_DIGITS;
use crate::time::TickUnit;

// =============================================================================
// Source Tags
// =============================================================================

/// Reduce a source path to a bare file stem for trace prefixes.
///
/// Keeps the text after the last `/` or `\`, then cuts at the first `.`:
/// `"src/net/uart_rx.rs"` becomes `"uart_rx"`.
pub fn trim_source_tag(path: &str) -> &str {
    let name = match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    };
    match name.find('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

// =============================================================================
// Truncating Writer
// =============================================================================

/// `fmt::Write` adapter that fills a `heapless::String` and drops the rest.
///
/// Plain `write!` into a `heapless::String` stops at the first fragment that
/// does not fit entirely. This adapter keeps every whole character that fits,
/// so a long message is cut at the buffer end rather than at a format argument.
pub struct TruncatingWriter<'a, const N: usize> {
    buf: &'a mut String<N>,
    truncated: bool,
}

impl<'a, const N: usize> TruncatingWriter<'a, N> {
    /// Append to `buf` (existing contents are kept).
    pub fn new(buf: &'a mut String<N>) -> Self {
        Self {
            buf,
            truncated: false,
        }
    }

    /// Whether any output was dropped.
    #[inline]
    pub const fn truncated(&self) -> bool { self.truncated }
}

impl<const N: usize> Write for TruncatingWriter<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if self.buf.push_str(s).is_ok() {
            return Ok(());
        }
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

/// Render `args` into `buf` (cleared first), truncating at capacity.
pub fn render_truncated<const N: usize>(
    buf: &mut String<N>,
    args: fmt::Arguments<'_>,
) {
    buf.clear();
    // TruncatingWriter never reports an error; only a Display impl could
    TruncatingWriter::new(buf).write_fmt(args).ok();
}

// =============================================================================
// Hex Dump
// =============================================================================

/// Convert a nibble to an uppercase hex digit.
#[inline]
const fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'A' + nibble - 10) as char,
    }
}

/// Append `data` as space-separated uppercase hex pairs (`" 0A FF"`).
///
/// Every byte is preceded by one space. A byte is only written if its space
/// and both digits fit, so the output never ends with a partial byte or a
/// dangling separator. Returns the number of bytes rendered.
pub fn push_hex<const N: usize>(
    buf: &mut String<N>,
    data: &[u8],
) -> usize {
    let mut written = 0;
    for &byte in data {
        if N - buf.len() < 3 {
            break;
        }
        // Capacity checked above, pushes cannot fail
        buf.push(' ').ok();
        buf.push(hex_digit(byte >> 4)).ok();
        buf.push(hex_digit(byte & 0x0F)).ok();
        written += 1;
    }
    written
}

// =============================================================================
// Time Rendering
// =============================================================================

/// Trace line timestamp: `SSSSS.mmm`, seconds zero-padded.
#[derive(Clone, Copy, Debug)]
pub struct Elapsed(pub u64);

impl fmt::Display for Elapsed {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{:0width$}.{:03}",
            self.0 / 1000,
            self.0 % 1000,
            width = ELAPSED_SECONDS_DIGITS
        )
    }
}

/// How timestamps and deltas are printed in an event report.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportStyle {
    /// Raw tick counts.
    Ticks,
    /// `seconds.milliseconds`, converting from the given tick unit.
    Seconds(TickUnit),
}

impl Default for ReportStyle {
    fn default() -> Self { Self::Seconds(TickUnit::Millis) }
}

/// One report column value, honouring the formatter's width and alignment.
#[derive(Clone, Copy, Debug)]
pub struct TickValue {
    /// Tick count or tick difference.
    pub ticks: u32,
    /// Rendering style.
    pub style: ReportStyle,
}

impl fmt::Display for TickValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.style {
            ReportStyle::Ticks => fmt::Display::fmt(&self.ticks, f),
            ReportStyle::Seconds(unit) => {
                let ms = unit.to_millis(self.ticks);
                // u32::MAX ms is "4294967.295", fits with room to spare
                let mut text: String<16> = String::new();
                write!(text, "{}.{:03}", ms / 1000, ms % 1000)?;
                f.pad(&text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_source_tag() {
        assert_eq!(trim_source_tag("src/net/uart_rx.rs"), "uart_rx");
        assert_eq!(trim_source_tag("C:\\fw\\src\\main.cpp"), "main");
        assert_eq!(trim_source_tag("mixed/path\\file.tar.gz"), "file");
        assert_eq!(trim_source_tag("noext"), "noext");
        assert_eq!(trim_source_tag("dir/"), "");
        assert_eq!(trim_source_tag(""), "");
    }

    #[test]
    fn test_truncating_writer_cuts_mid_argument() {
        let mut buf: String<8> = String::new();
        render_truncated(&mut buf, format_args!("{}-{}", "abcdef", "ghijkl"));
        assert_eq!(buf.as_str(), "abcdef-g");
    }

    #[test]
    fn test_truncating_writer_keeps_whole_chars() {
        let mut buf: String<5> = String::new();
        let mut w = TruncatingWriter::new(&mut buf);
        // "é" is two bytes; the third one would not fit
        w.write_str("ééé").unwrap();
        assert!(w.truncated());
        assert_eq!(buf.as_str(), "éé");
    }

    #[test]
    fn test_render_truncated_clears_first() {
        let mut buf: String<16> = String::new();
        render_truncated(&mut buf, format_args!("first"));
        render_truncated(&mut buf, format_args!("x={}", 42));
        assert_eq!(buf.as_str(), "x=42");
    }

    #[test]
    fn test_push_hex_uppercase() {
        let mut buf: String<32> = String::new();
        let n = push_hex(&mut buf, &[0x00, 0x0A, 0xFF, 0x5c]);
        assert_eq!(n, 4);
        assert_eq!(buf.as_str(), " 00 0A FF 5C");
    }

    #[test]
    fn test_push_hex_truncates_whole_bytes() {
        // Room for two bytes (6 chars) plus two spare chars
        let mut buf: String<8> = String::new();
        let n = push_hex(&mut buf, &[1, 2, 3, 4]);
        assert_eq!(n, 2);
        assert_eq!(buf.as_str(), " 01 02");
    }

    #[test]
    fn test_push_hex_empty() {
        let mut buf: String<8> = String::new();
        assert_eq!(push_hex(&mut buf, &[]), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_elapsed_padding() {
        let mut s: String<16> = String::new();
        write!(s, "{}", Elapsed(12_345)).unwrap();
        assert_eq!(s.as_str(), "00012.345");

        s.clear();
        write!(s, "{}", Elapsed(123_456_789)).unwrap();
        assert_eq!(s.as_str(), "123456.789");
    }

    #[test]
    fn test_tick_value_seconds() {
        let mut s: String<32> = String::new();
        let v = TickValue {
            ticks: 2_500_000,
            style: ReportStyle::Seconds(TickUnit::Micros),
        };
        write!(s, "[{:>11}]", v).unwrap();
        assert_eq!(s.as_str(), "[      2.500]");
    }

    #[test]
    fn test_tick_value_raw() {
        let mut s: String<32> = String::new();
        let v = TickValue {
            ticks: 42,
            style: ReportStyle::Ticks,
        };
        write!(s, "[{:>11}]", v).unwrap();
        assert_eq!(s.as_str(), "[         42]");
    }
}
