//! Events instrumented by the firmware.
//!
//! Discriminants are the event kinds registered with the event timer, so
//! they start at 1 (kind 0 marks an empty slot). [`EVENT_LABELS`] is indexed
//! by the same value and is meant for `set_all_labels`.

use evtrace_common::EventKind;

/// Instrumented occurrences.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Event {
    /// Main loop iteration begins.
    LoopStart = 1,
    /// Main loop iteration ends.
    LoopEnd = 2,
    /// Main loop requests a sensor sample.
    SensorPoll = 3,
    /// Sensor signals data ready.
    SensorReady = 4,
    /// Button pressed (debounced).
    ButtonPress = 5,
    /// Report task starts printing.
    Report = 6,
}

impl Event {
    /// Every event, in kind order.
    pub const ALL: [Self; 6] = [
        Self::LoopStart,
        Self::LoopEnd,
        Self::SensorPoll,
        Self::SensorReady,
        Self::ButtonPress,
        Self::Report,
    ];

    /// Kind registered with the event timer.
    #[inline]
    pub const fn kind(self) -> EventKind { EventKind::from_const(self as u8) }

    /// Display label.
    #[inline]
    pub const fn label(self) -> &'static str { EVENT_LABELS[self as usize] }
}

/// Labels indexed by event kind. Entry 0 is never bound.
pub const EVENT_LABELS: [&str; Event::ALL.len() + 1] = [
    "",
    "loop start",
    "loop end",
    "sensor poll",
    "sensor ready",
    "button",
    "report",
];
