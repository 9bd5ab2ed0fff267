//! The value handed from a call site to sinks: everything a formatter may render.

use crate::level::Level;
use crate::util;
use std::time::SystemTime;

/// Where a log call was made. Strings come from `file!()`/function-name literals, so they are
/// borrowed for `'static` and never copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub file: Option<&'static str>,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file: Some(file),
            line,
            function: Some(function),
        }
    }

    /// A location without a line number carries no useful position.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.line == 0
    }

    /// File name, or `""` when absent.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file.unwrap_or("")
    }

    /// Function name, or `""` when absent.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        self.function.unwrap_or("")
    }
}

/// One log event. Borrows the logger name and payload from the caller, so it lives only
/// for the synchronous `log`/`format` call that consumes it.
#[derive(Debug, Clone, Copy)]
pub struct LogMessage<'a> {
    pub logger_name: &'a str,
    pub level: Level,
    pub time: SystemTime,
    pub thread_id: u64,
    pub source: SourceLocation,
    pub payload: &'a str,
}

impl<'a> LogMessage<'a> {
    /// Fully specified event; the thread id is still taken from the calling thread.
    #[must_use]
    pub fn with_time(
        logger_name: &'a str,
        level: Level,
        time: SystemTime,
        source: SourceLocation,
        payload: &'a str,
    ) -> Self {
        Self {
            logger_name,
            level,
            time,
            thread_id: util::current_thread_id(),
            source,
            payload,
        }
    }

    /// Event stamped with the current time.
    #[must_use]
    pub fn with_source(
        logger_name: &'a str,
        level: Level,
        source: SourceLocation,
        payload: &'a str,
    ) -> Self {
        Self::with_time(logger_name, level, SystemTime::now(), source, payload)
    }

    /// Event stamped with the current time and no source location.
    #[must_use]
    pub fn new(logger_name: &'a str, level: Level, payload: &'a str) -> Self {
        Self::with_source(logger_name, level, SourceLocation::default(), payload)
    }
}
