//! Breaking an epoch second into calendar fields is the expensive part of rendering a
//! timestamp, so it sits behind a trait the formatter calls at most once per second.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

/// Calendar fields for one second, already in display ranges (month and day start at 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarTime {
    fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

/// Strategy for turning epoch seconds into calendar fields.
///
/// Formatters are cloned per consumer, so implementations must be cheap to clone.
pub trait Calendar: Clone + Send + 'static {
    fn decompose(&self, epoch_seconds: i64) -> CalendarTime;
}

/// The process's local time zone, as configured by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn decompose(&self, epoch_seconds: i64) -> CalendarTime {
        Local
            .timestamp_opt(epoch_seconds, 0)
            .earliest()
            .map(|dt| CalendarTime::from_datetime(&dt))
            .unwrap_or_default()
    }
}

/// UTC, for machines whose logs are collated across time zones.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcCalendar;

impl Calendar for UtcCalendar {
    fn decompose(&self, epoch_seconds: i64) -> CalendarTime {
        DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
            .map(|dt| CalendarTime::from_datetime(&dt))
            .unwrap_or_default()
    }
}
