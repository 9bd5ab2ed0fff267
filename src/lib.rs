//! `minispdlog` - pattern-formatting log sinks.
//!
//! A small logging core built from two pieces:
//! - [`PatternFormatter`] compiles a `%`-pattern once and renders messages into a byte
//!   buffer, recomputing calendar fields only when the second changes
//! - [`Sink`]s own a formatter and a stream behind one lock, so concurrent writers never
//!   interleave bytes within a line
//!
//! # Example
//!
//! ```
//! use minispdlog::{BaseSink, Level, LogMessage, PatternFormatter, Sink};
//!
//! let sink: BaseSink<Vec<u8>> = BaseSink::new(Vec::new());
//! sink.set_formatter(Box::new(PatternFormatter::new("[%l] [%n] %v")));
//! sink.set_level(Level::Info);
//!
//! let msg = LogMessage::new("app", Level::Warn, "disk almost full");
//! if sink.should_log(msg.level) {
//!     sink.log(&msg).unwrap();
//! }
//!
//! assert_eq!(sink.into_target(), b"[W] [app] disk almost full\n");
//! ```
//!
//! # Features
//!
//! - `cli` (default): Enables the `minispdlog` command-line binary

pub mod config;
mod error;
pub mod internal;
pub mod level;
pub mod message;
pub mod pattern;
pub mod sink;
pub mod util;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use config::Config;
pub use error::Error;
pub use level::Level;
pub use message::{LogMessage, SourceLocation};
pub use pattern::{DEFAULT_PATTERN, Formatter, PatternFormatter};
pub use sink::{
    BaseSink, ConsoleSinkMt, ConsoleSinkSt, MultiThreaded, SharedSink, SingleThreaded, Sink,
    StderrSinkMt, StderrSinkSt,
};
pub use util::{
    Calendar, CalendarTime, LocalCalendar, UtcCalendar, current_thread_id,
    current_timestamp_millis, format_time,
};
