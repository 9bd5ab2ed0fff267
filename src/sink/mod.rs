//! Output targets for rendered log lines.
//!
//! A sink owns its formatter and stream behind one lock, so a message is rendered and written
//! as a unit even when many threads share the sink.

mod base;
mod lock;

pub use base::BaseSink;
pub use lock::{Locking, MultiThreaded, SingleThreaded, SinkCell};

use crate::Error;
use crate::level::Level;
use crate::message::LogMessage;
use crate::pattern::{Formatter, PatternFormatter};
use std::io;
use std::sync::Arc;

/// Thread-safe stdout sink.
pub type ConsoleSinkMt = BaseSink<io::Stdout, MultiThreaded>;
/// Stdout sink for single-threaded programs.
pub type ConsoleSinkSt = BaseSink<io::Stdout, SingleThreaded>;
/// Thread-safe stderr sink.
pub type StderrSinkMt = BaseSink<io::Stderr, MultiThreaded>;
/// Stderr sink for single-threaded programs.
pub type StderrSinkSt = BaseSink<io::Stderr, SingleThreaded>;

/// How callers hold a sink shared between threads.
pub type SharedSink = Arc<dyn Sink + Send + Sync>;

/// An output target. Every method takes the sink's lock for its whole duration.
///
/// `log` does not consult the level: callers ask [`Sink::should_log`] first and skip
/// building the message when it returns false.
pub trait Sink {
    /// Renders `msg` with the sink's formatter and writes the line.
    ///
    /// # Errors
    /// [`Error::SinkWrite`] when the underlying stream rejects the write.
    fn log(&self, msg: &LogMessage<'_>) -> Result<(), Error>;

    /// # Errors
    /// [`Error::SinkWrite`] when the underlying stream fails to flush.
    fn flush(&self) -> Result<(), Error>;

    fn set_level(&self, level: Level);

    fn level(&self) -> Level;

    /// True when a message at `level` passes this sink's threshold.
    fn should_log(&self, level: Level) -> bool;

    fn set_formatter(&self, formatter: Box<dyn Formatter>);

    /// Replaces the formatter with a local-time [`PatternFormatter`] for `pattern`.
    fn set_pattern(&self, pattern: &str) {
        self.set_formatter(Box::new(PatternFormatter::new(pattern)));
    }
}
