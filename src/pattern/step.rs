//! Compiled pattern steps. Each step appends straight into the output buffer, so a rendered
//! line costs one buffer and no per-field allocations.

use crate::internal;
use crate::message::LogMessage;
use crate::util::CalendarTime;

/// Closed set of `%` flags. Any other character after `%` produces no step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    ThreadId,
    LevelShort,
    LevelFull,
    LoggerName,
    Payload,
    SourceFile,
    SourceFunction,
    SourceLine,
}

impl Flag {
    /// The character that selects this flag after `%`.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Year => 'Y',
            Self::Month => 'm',
            Self::Day => 'd',
            Self::Hour => 'H',
            Self::Minute => 'M',
            Self::Second => 'S',
            Self::ThreadId => 't',
            Self::LevelShort => 'l',
            Self::LevelFull => 'L',
            Self::LoggerName => 'n',
            Self::Payload => 'v',
            Self::SourceFile => 'F',
            Self::SourceFunction => 'f',
            Self::SourceLine => 'P',
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::ThreadId,
        Self::LevelShort,
        Self::LevelFull,
        Self::LoggerName,
        Self::Payload,
        Self::SourceFile,
        Self::SourceFunction,
        Self::SourceLine,
    ];

    /// Case-sensitive: `%m` is month, `%M` is minute.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.as_char() == c)
    }

    fn render(self, msg: &LogMessage<'_>, time: &CalendarTime, dest: &mut Vec<u8>) {
        match self {
            Self::Year => push_year(dest, time.year),
            Self::Month => push_decimal(dest, u64::from(time.month), 2),
            Self::Day => push_decimal(dest, u64::from(time.day), 2),
            Self::Hour => push_decimal(dest, u64::from(time.hour), 2),
            Self::Minute => push_decimal(dest, u64::from(time.minute), 2),
            Self::Second => push_decimal(dest, u64::from(time.second), 2),
            Self::ThreadId => push_decimal(dest, msg.thread_id, 1),
            Self::LevelShort => dest.extend_from_slice(msg.level.as_short_str().as_bytes()),
            Self::LevelFull => dest.extend_from_slice(msg.level.as_str().as_bytes()),
            Self::LoggerName => dest.extend_from_slice(msg.logger_name.as_bytes()),
            Self::Payload => dest.extend_from_slice(msg.payload.as_bytes()),
            Self::SourceFile => dest.extend_from_slice(msg.source.file_name().as_bytes()),
            Self::SourceFunction => dest.extend_from_slice(msg.source.function_name().as_bytes()),
            Self::SourceLine => push_decimal(dest, u64::from(msg.source.line), 1),
        }
    }
}

/// One unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Text between flags, copied verbatim.
    Literal(String),
    /// A field of the message or of its calendar time.
    Flag(Flag),
}

impl Step {
    pub(crate) fn render(&self, msg: &LogMessage<'_>, time: &CalendarTime, dest: &mut Vec<u8>) {
        match self {
            Self::Literal(text) => dest.extend_from_slice(text.as_bytes()),
            Self::Flag(flag) => flag.render(msg, time, dest),
        }
    }
}

/// Splits a pattern into literal runs and flags, in source order.
pub(crate) fn compile(pattern: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        if !literal.is_empty() {
            steps.push(Step::Literal(std::mem::take(&mut literal)));
        }

        // A trailing bare '%' has no flag and emits nothing
        let Some(flag_char) = chars.next() else {
            break;
        };

        match Flag::from_char(flag_char) {
            Some(flag) => steps.push(Step::Flag(flag)),
            None => internal::trace(
                "PATTERN",
                &format!("Dropping unknown flag '%{flag_char}' in \"{pattern}\""),
            ),
        }
    }

    if !literal.is_empty() {
        steps.push(Step::Literal(literal));
    }

    steps
}

fn push_year(dest: &mut Vec<u8>, year: i32) {
    if year < 0 {
        dest.push(b'-');
    }
    push_decimal(dest, u64::from(year.unsigned_abs()), 4);
}

/// Appends `value` in base 10, left-padded with zeros to at least `width` digits.
#[allow(clippy::cast_possible_truncation)]
fn push_decimal(dest: &mut Vec<u8>, mut value: u64, width: usize) {
    let mut digits = [0u8; 20];
    let mut len = 0;
    loop {
        digits[len] = b'0' + (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    dest.extend(std::iter::repeat_n(b'0', width.saturating_sub(len)));
    dest.extend(digits[..len].iter().rev());
}
