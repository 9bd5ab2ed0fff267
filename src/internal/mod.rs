//! minispdlog's own diagnostic channel. Config problems and dropped pattern flags are
//! reported through a stderr sink built from the same formatter and sink types users get.
//!
//! Uses `OnceLock` so the sink is initialized exactly once, even if
//! multiple entry points (CLI, tests) race to call `init`.

use crate::config::Config;
use crate::level::Level;
use crate::message::LogMessage;
use crate::sink::{Sink, StderrSinkMt};
use std::sync::OnceLock;

const INTERNAL_PATTERN: &str = "[%H:%M:%S] [minispdlog] [%L] [%n] %v";

static INTERNAL_SINK: OnceLock<StderrSinkMt> = OnceLock::new();

/// Fallback initializer that loads config itself, for callers that have none.
///
/// `OnceLock` guarantees only the first call takes effect; later calls are no-ops.
pub fn init() {
    let was_init = INTERNAL_SINK.get().is_some();
    INTERNAL_SINK.get_or_init(|| {
        let config = Config::load().unwrap_or_default();
        build_internal_sink(&config)
    });
    if !was_init {
        debug("INTERNAL", "Internal sink ready");
    }
}

/// Builds the internal sink from an already-loaded config.
pub fn init_with_config(config: &Config) {
    let was_init = INTERNAL_SINK.get().is_some();
    INTERNAL_SINK.get_or_init(|| build_internal_sink(config));
    if !was_init {
        debug(
            "INTERNAL",
            &format!(
                "Internal sink ready: level={}, time_zone={}",
                config.general.internal_level, config.general.time_zone
            ),
        );
    }
}

fn build_internal_sink(config: &Config) -> StderrSinkMt {
    StderrSinkMt::with_formatter(std::io::stderr(), config.formatter(INTERNAL_PATTERN))
        .level_threshold(config.parse_internal_level())
}

/// Calls made before `init` are dropped.
/// Write failures are dropped: there is nowhere left to report them.
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(sink) = INTERNAL_SINK.get()
        && sink.should_log(level)
    {
        let _ = sink.log(&LogMessage::new(scope, level, msg));
    }
}

/// High-volume instrumentation (e.g. each dropped pattern flag).
pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

/// Startup and configuration details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Normal milestones such as a loaded config.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies: unknown level names, missing includes.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Failures the crate recovered from but the user should know about.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
