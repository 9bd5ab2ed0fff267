//! The one sink implementation: a level, a formatter, and a byte stream, all behind a single
//! lock chosen by the [`Locking`] parameter.

use super::Sink;
use super::lock::{Locking, MultiThreaded, SinkCell};
use crate::Error;
use crate::level::Level;
use crate::message::LogMessage;
use crate::pattern::{Formatter, PatternFormatter};
use std::io::{self, Write};

/// Everything the lock protects.
struct SinkState<W> {
    level: Level,
    formatter: Box<dyn Formatter>,
    target: W,
}

/// Sink writing rendered lines to any [`Write`] target.
///
/// Stdout and stderr get named constructors; files, sockets, or in-memory buffers plug in
/// through [`BaseSink::new`].
pub struct BaseSink<W: Write + Send, L: Locking = MultiThreaded> {
    state: L::Cell<SinkState<W>>,
}

impl<W: Write + Send, L: Locking> BaseSink<W, L> {
    /// Accepts every level and renders with the default pattern in local time.
    #[must_use]
    pub fn new(target: W) -> Self {
        Self::with_formatter(target, Box::new(PatternFormatter::default()))
    }

    #[must_use]
    pub fn with_formatter(target: W, formatter: Box<dyn Formatter>) -> Self {
        Self {
            state: SinkCell::wrap(SinkState {
                level: Level::Trace,
                formatter,
                target,
            }),
        }
    }

    /// Builder-style threshold for freshly constructed sinks.
    #[must_use]
    pub fn level_threshold(self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    /// Runs `f` against the target while holding the sink's lock.
    pub fn with_target<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        self.state.with(|state| f(&mut state.target))
    }

    /// Tears the sink down and hands back its stream.
    #[must_use]
    pub fn into_target(self) -> W {
        self.state.into_inner().target
    }
}

impl<L: Locking> BaseSink<io::Stdout, L> {
    /// Sink on the process's standard output.
    #[must_use]
    pub fn console() -> Self {
        Self::new(io::stdout())
    }
}

impl<L: Locking> BaseSink<io::Stderr, L> {
    /// Sink on the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send, L: Locking> Sink for BaseSink<W, L> {
    fn log(&self, msg: &LogMessage<'_>) -> Result<(), Error> {
        self.state.with(|state| {
            // Rendered in full before the write so one message reaches the stream in one call
            let mut buf = Vec::with_capacity(msg.payload.len() + 64);
            state.formatter.format(msg, &mut buf);
            state.target.write_all(&buf).map_err(Error::SinkWrite)
        })
    }

    fn flush(&self) -> Result<(), Error> {
        self.state
            .with(|state| state.target.flush().map_err(Error::SinkWrite))
    }

    fn set_level(&self, level: Level) {
        self.state.with(|state| state.level = level);
    }

    fn level(&self) -> Level {
        self.state.with(|state| state.level)
    }

    fn should_log(&self, level: Level) -> bool {
        self.state.with(|state| state.level.is_enabled(level))
    }

    fn set_formatter(&self, formatter: Box<dyn Formatter>) {
        self.state.with(|state| state.formatter = formatter);
    }
}
