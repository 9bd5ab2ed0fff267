//! Tests for sink locking, level handling, and write behavior.

use minispdlog::{
    BaseSink, ConsoleSinkMt, Error, Level, LogMessage, PatternFormatter, SharedSink,
    SingleThreaded, Sink, SourceLocation, StderrSinkSt, UtcCalendar,
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, UNIX_EPOCH};

/// Clonable handle to one in-memory buffer, so tests can read what a sink wrote.
#[derive(Clone, Default)]
struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<AtomicUsize>,
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Accepts one byte per call and yields in between, so unsynchronized writers would
/// interleave almost immediately.
#[derive(Clone, Default)]
struct TricklingWriter(SharedBuffer);

impl Write for TricklingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(first) = buf.first() else {
            return Ok(0);
        };
        self.0.bytes.lock().unwrap().push(*first);
        thread::yield_now();
        Ok(1)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }
}

fn buffer_sink(pattern: &str) -> (BaseSink<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let sink = BaseSink::with_formatter(
        buffer.clone(),
        Box::new(PatternFormatter::with_calendar(pattern, UtcCalendar)),
    );
    (sink, buffer)
}

#[test]
fn new_sink_accepts_everything() {
    let (sink, _) = buffer_sink("%v");
    assert_eq!(sink.level(), Level::Trace);
    assert!(sink.should_log(Level::Trace));
}

#[test]
fn set_level_changes_gate() {
    let (sink, _) = buffer_sink("%v");
    sink.set_level(Level::Warn);

    assert_eq!(sink.level(), Level::Warn);
    assert!(!sink.should_log(Level::Info));
    assert!(sink.should_log(Level::Warn));
    assert!(sink.should_log(Level::Critical));

    sink.set_level(Level::Off);
    assert!(!sink.should_log(Level::Critical));

    sink.set_level(Level::Debug);
    assert!(sink.should_log(Level::Debug));
}

#[test]
fn log_writes_formatted_line() {
    let (sink, buffer) = buffer_sink("[%Y-%m-%d %H:%M:%S] [%L] [%n] %v");
    let msg = LogMessage::with_time(
        "net",
        Level::Info,
        UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        SourceLocation::default(),
        "connected",
    );

    sink.log(&msg).unwrap();
    assert_eq!(
        buffer.contents(),
        "[2023-11-14 22:13:20] [info] [net] connected\n"
    );
}

#[test]
fn log_does_not_recheck_level() {
    let (sink, buffer) = buffer_sink("%v");
    sink.set_level(Level::Error);

    let msg = LogMessage::new("app", Level::Debug, "written anyway");
    assert!(!sink.should_log(msg.level));
    sink.log(&msg).unwrap();

    assert_eq!(buffer.contents(), "written anyway\n");
}

#[test]
fn caller_gate_filters_messages() {
    let (sink, buffer) = buffer_sink("%l %v");
    sink.set_level(Level::Info);

    for (level, text) in [
        (Level::Debug, "skipped"),
        (Level::Info, "kept"),
        (Level::Error, "also kept"),
    ] {
        let msg = LogMessage::new("app", level, text);
        if sink.should_log(msg.level) {
            sink.log(&msg).unwrap();
        }
    }

    assert_eq!(buffer.contents(), "I kept\nE also kept\n");
}

#[test]
fn flush_reaches_target() {
    let (sink, buffer) = buffer_sink("%v");
    sink.flush().unwrap();
    sink.flush().unwrap();
    assert_eq!(buffer.flushes.load(Ordering::SeqCst), 2);
}

#[test]
fn set_pattern_replaces_formatter() {
    let (sink, buffer) = buffer_sink("%v");
    sink.set_pattern("<%n> %v");

    sink.log(&LogMessage::new("db", Level::Info, "ready")).unwrap();
    assert_eq!(buffer.contents(), "<db> ready\n");
}

#[test]
fn set_formatter_replaces_formatter() {
    let (sink, buffer) = buffer_sink("%v");
    sink.set_formatter(Box::new(PatternFormatter::with_calendar(
        "%L|%v",
        UtcCalendar,
    )));

    sink.log(&LogMessage::new("db", Level::Critical, "down")).unwrap();
    assert_eq!(buffer.contents(), "critical|down\n");
}

#[test]
fn sinks_with_different_patterns() {
    let (terse, terse_buf) = buffer_sink("%v");
    let (verbose, verbose_buf) = buffer_sink("[%L] [%n] %v");
    let msg = LogMessage::new("multi", Level::Info, "same message");

    terse.log(&msg).unwrap();
    verbose.log(&msg).unwrap();

    assert_eq!(terse_buf.contents(), "same message\n");
    assert_eq!(verbose_buf.contents(), "[info] [multi] same message\n");
}

#[test]
fn write_failure_surfaces_as_sink_write() {
    let sink: BaseSink<BrokenPipe> = BaseSink::new(BrokenPipe);

    let err = sink
        .log(&LogMessage::new("app", Level::Error, "lost"))
        .unwrap_err();
    assert!(matches!(err, Error::SinkWrite(ref e) if e.kind() == io::ErrorKind::BrokenPipe));

    assert!(matches!(sink.flush(), Err(Error::SinkWrite(_))));
}

#[test]
fn sink_stays_usable_after_failure() {
    let sink: BaseSink<BrokenPipe> = BaseSink::new(BrokenPipe);
    let _ = sink.log(&LogMessage::new("app", Level::Error, "lost"));

    sink.set_level(Level::Warn);
    assert_eq!(sink.level(), Level::Warn);
}

#[test]
fn single_threaded_sink() {
    let buffer = SharedBuffer::default();
    let sink = BaseSink::<SharedBuffer, SingleThreaded>::with_formatter(
        buffer.clone(),
        Box::new(PatternFormatter::with_calendar("%l:%v", UtcCalendar)),
    )
    .level_threshold(Level::Info);

    let msg = LogMessage::new("st", Level::Info, "one thread");
    assert!(sink.should_log(msg.level));
    sink.log(&msg).unwrap();
    sink.flush().unwrap();

    assert_eq!(buffer.contents(), "I:one thread\n");
}

#[test]
fn into_target_returns_stream() {
    let sink: BaseSink<Vec<u8>> = BaseSink::with_formatter(
        Vec::new(),
        Box::new(PatternFormatter::with_calendar("%v", UtcCalendar)),
    );
    sink.log(&LogMessage::new("x", Level::Info, "a")).unwrap();
    sink.log(&LogMessage::new("x", Level::Info, "b")).unwrap();

    assert_eq!(sink.with_target(|target| target.len()), 4);
    assert_eq!(sink.into_target(), b"a\nb\n");
}

#[test]
fn console_and_stderr_constructors() {
    let console = ConsoleSinkMt::console();
    console.set_level(Level::Off);
    assert!(!console.should_log(Level::Critical));

    let stderr = StderrSinkSt::stderr().level_threshold(Level::Error);
    assert_eq!(stderr.level(), Level::Error);
    stderr.flush().unwrap();
}

#[test]
fn concurrent_logs_never_interleave_within_a_line() {
    const THREADS: usize = 8;
    const MESSAGES: usize = 100;

    let writer = TricklingWriter::default();
    let captured = writer.0.clone();
    let sink: BaseSink<TricklingWriter> = BaseSink::with_formatter(
        writer,
        Box::new(PatternFormatter::with_calendar("[%n] %v", UtcCalendar)),
    );
    let sink: SharedSink = Arc::new(sink);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                let name = format!("worker-{t}");
                for i in 0..MESSAGES {
                    let payload = format!("message {i} from thread {t}");
                    let msg = LogMessage::new(&name, Level::Info, &payload);
                    if sink.should_log(msg.level) {
                        sink.log(&msg).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = captured.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES);

    let mut next_expected = [0usize; THREADS];
    for line in lines {
        let (name, payload) = line
            .strip_prefix("[worker-")
            .and_then(|rest| rest.split_once("] "))
            .unwrap_or_else(|| panic!("corrupted line: {line:?}"));
        let t: usize = name.parse().unwrap();
        assert_eq!(
            payload,
            format!("message {} from thread {t}", next_expected[t]),
            "corrupted or reordered line: {line:?}"
        );
        next_expected[t] += 1;
    }
    assert!(next_expected.iter().all(|&n| n == MESSAGES));
}
