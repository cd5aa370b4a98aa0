//! Trace macros tagging lines with the calling source file.
//!
//! # Usage
//!
//! ```ignore
//! use evtrace_common::{trace_assert, trace_fmt, trace_hex, trace_line};
//!
//! trace_line!(channel, "boot");
//! trace_fmt!(channel, "adc={} mv={}", raw, mv);
//! trace_hex!(channel, "rx", &frame);
//! trace_assert!(channel, len <= MAX_FRAME);
//! ```

/// Print a fixed message, tagged with the calling file.
#[macro_export]
macro_rules! trace_line {
    ($channel:expr, $msg:expr) => {
        $channel.write_line(file!(), $msg)
    };
}

/// Print a formatted message, tagged with the calling file.
#[macro_export]
macro_rules! trace_fmt {
    ($channel:expr, $($arg:tt)*) => {
        $channel.write_fmt_line(file!(), format_args!($($arg)*))
    };
}

/// Print a hex dump of a byte slice, tagged with the calling file.
#[macro_export]
macro_rules! trace_hex {
    ($channel:expr, $prefix:expr, $data:expr) => {
        $channel.write_binary_line(file!(), $prefix, $data)
    };
}

/// Halt the device, after printing the file and line, if the condition is false.
#[macro_export]
macro_rules! trace_assert {
    ($channel:expr, $cond:expr) => {
        $channel.assert_or_halt(file!(), line!(), $cond)
    };
}

#[cfg(test)]
mod tests {
    use core::fmt::{self, Write};

    use crate::channel::{OutputChannel, TraceChannel};
    use crate::time::ManualClock;

    #[derive(Default)]
    struct Capture(String);

    impl Write for Capture {
        fn write_str(
            &mut self,
            s: &str,
        ) -> fmt::Result {
            self.0.push_str(s);
            Ok(())
        }
    }

    impl OutputChannel for Capture {}

    #[test]
    fn test_macros_tag_with_file() {
        let clock = ManualClock::new(2_000);
        let mut ch = TraceChannel::new(Capture::default(), &clock);

        trace_line!(ch, "hello");
        trace_fmt!(ch, "n={}", 3);
        trace_hex!(ch, "rx", &[0x10, 0x20]);
        trace_assert!(ch, 1 + 1 == 2);

        let expected = "\
[00002.000] [macros       ] hello
[00002.000] [macros       ] n=3
[00002.000] [macros       ] rx l=2: 10 20
";
        assert_eq!(ch.sink().0, expected);
    }
}
