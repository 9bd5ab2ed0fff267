//! `%`-pattern formatting. A pattern such as `"[%H:%M:%S] [%l] %v"` is compiled once into a
//! list of steps and replayed for every message; calendar fields are recomputed only when a
//! message falls in a different second than the previous one.

mod step;

pub use step::{Flag, Step};

use crate::message::LogMessage;
use crate::util::{self, Calendar, CalendarTime, LocalCalendar};

/// Used when no pattern is configured.
pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S] [%t] [%l] [%n] [%F:%f:%P] %v";

/// Renders a message into bytes. Sinks own one and call it under their lock.
pub trait Formatter: Send {
    /// Appends the rendered line, newline included, to `dest`.
    fn format(&mut self, msg: &LogMessage<'_>, dest: &mut Vec<u8>);

    /// Same configuration, fresh internal state.
    fn box_clone(&self) -> Box<dyn Formatter>;
}

impl Clone for Box<dyn Formatter> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// The last decomposed second. `None` until the first message.
#[derive(Debug, Clone, Copy, Default)]
struct TimeCache {
    second: Option<i64>,
    time: CalendarTime,
}

/// Compiled `%`-pattern plus a one-entry time cache.
///
/// Not thread-safe on its own: keep it behind a sink's lock or give each consumer a clone.
#[derive(Debug)]
pub struct PatternFormatter<C = LocalCalendar> {
    pattern: String,
    steps: Vec<Step>,
    calendar: C,
    cache: TimeCache,
}

impl PatternFormatter<LocalCalendar> {
    /// Formatter that renders times in the local time zone.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_calendar(pattern, LocalCalendar)
    }
}

impl Default for PatternFormatter<LocalCalendar> {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl<C: Calendar> PatternFormatter<C> {
    /// Formatter that decomposes timestamps through `calendar`.
    #[must_use]
    pub fn with_calendar(pattern: impl Into<String>, calendar: C) -> Self {
        let pattern = pattern.into();
        let steps = step::compile(&pattern);
        Self {
            pattern,
            steps,
            calendar,
            cache: TimeCache::default(),
        }
    }

    /// Recompiles; the previous steps are discarded before the next `format`.
    pub fn set_pattern(&mut self, pattern: &str) {
        self.steps = step::compile(pattern);
        self.pattern = pattern.to_string();
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Compiled steps in source order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Epoch second whose calendar fields are currently cached.
    #[must_use]
    pub const fn cached_second(&self) -> Option<i64> {
        self.cache.second
    }

    fn calendar_time(&mut self, msg: &LogMessage<'_>) -> CalendarTime {
        let second = util::epoch_seconds(msg.time);
        if self.cache.second != Some(second) {
            self.cache = TimeCache {
                second: Some(second),
                time: self.calendar.decompose(second),
            };
        }
        self.cache.time
    }
}

impl<C: Calendar> Clone for PatternFormatter<C> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            steps: self.steps.clone(),
            calendar: self.calendar.clone(),
            cache: TimeCache::default(),
        }
    }
}

impl<C: Calendar> Formatter for PatternFormatter<C> {
    fn format(&mut self, msg: &LogMessage<'_>, dest: &mut Vec<u8>) {
        let time = self.calendar_time(msg);
        for step in &self.steps {
            step.render(msg, &time, dest);
        }
        dest.push(b'\n');
    }

    fn box_clone(&self) -> Box<dyn Formatter> {
        Box::new(self.clone())
    }
}
