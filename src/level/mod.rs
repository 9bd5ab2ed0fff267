//! Severity levels that gate which messages reach which sinks.

use std::fmt;
use std::str::FromStr;

/// Long names indexed by ordinal. `err` rather than `error` keeps the `%L` column narrow.
const LEVEL_NAMES: [&str; 7] = ["trace", "debug", "info", "warn", "err", "critical", "off"];

/// One-letter codes indexed by ordinal, rendered by `%l`.
const LEVEL_SHORT_NAMES: [&str; 7] = ["T", "D", "I", "W", "E", "C", "O"];

/// Derives `Ord` so sinks can compare a message's level against their configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Diagnostic detail useful while chasing a problem.
    Debug = 1,
    /// Normal operational milestones.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Failures that leave the process unable to continue.
    Critical = 5,
    /// Threshold only: a sink set to `Off` accepts nothing.
    Off = 6,
}

impl Level {
    /// Every level in ordinal order, `Off` included.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Off,
    ];

    /// Full name as rendered by `%L`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }

    /// One-letter code as rendered by `%l`.
    #[must_use]
    pub const fn as_short_str(self) -> &'static str {
        LEVEL_SHORT_NAMES[self as usize]
    }

    /// Raw ordinals come from FFI-ish callers and config; anything past `Off` has no level.
    #[must_use]
    pub const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Critical),
            6 => Some(Self::Off),
            _ => None,
        }
    }

    /// Lenient lookup against the long names, ignoring case.
    ///
    /// Anything unrecognised maps to [`Level::Info`]. Typos are therefore invisible here;
    /// use [`str::parse`] when the caller needs to know.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        LEVEL_NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .and_then(|index| u8::try_from(index).ok())
            .and_then(Self::from_repr)
            .unwrap_or(Self::Info)
    }

    /// True when a message at `level` passes a threshold of `self`.
    #[must_use]
    pub fn is_enabled(self, level: Self) -> bool {
        level >= self
    }
}

/// Long name for a raw ordinal, or `"unknown"` when it is out of range.
#[must_use]
pub fn name_for(ordinal: usize) -> &'static str {
    LEVEL_NAMES.get(ordinal).copied().unwrap_or("unknown")
}

/// Short code for a raw ordinal, or `"unknown"` when it is out of range.
#[must_use]
pub fn short_name_for(ordinal: usize) -> &'static str {
    LEVEL_SHORT_NAMES.get(ordinal).copied().unwrap_or("unknown")
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from a real level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "off" => Ok(Self::Off),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
