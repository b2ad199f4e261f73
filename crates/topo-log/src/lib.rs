//! Leveled, filterable logging for the topo daemons.
//!
//! Every component takes an explicit [`Logger`] handle instead of talking to
//! a process-global sink; a `Logger` is cheap to clone (shared interior) and
//! safe to hand to concurrent workers. Writes to the sink are serialized so
//! parallel dumps never interleave their output.
//!
//! Messages render as `LEVEL location-or-name: body`. When no name tag is
//! given the call site (source file base name and line) is substituted, and
//! with colorization enabled the level tag and body are wrapped in
//! level-specific ANSI colors. A message whose fully rendered text contains
//! any configured filter substring is suppressed before it reaches the sink.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::str::FromStr;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

/// ANSI sequences applied when colorization is enabled.
const COLOR_LINE: &str = "\x1b[90m";
const COLOR_DEBUG: &str = "\x1b[36m";
const COLOR_INFO: &str = "\x1b[32m";
const COLOR_WARN: &str = "\x1b[33m";
const COLOR_ERROR: &str = "\x1b[31m";
const COLOR_FATAL: &str = "\x1b[35m";
const COLOR_RESET: &str = "\x1b[0m";

/// Log severity, ascending. FATAL is only the highest ordinal; the logger
/// never terminates the process on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Prologue tag written ahead of every message at this level.
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Debug => COLOR_DEBUG,
            Level::Info => COLOR_INFO,
            Level::Warn => COLOR_WARN,
            Level::Error => COLOR_ERROR,
            Level::Fatal => COLOR_FATAL,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a level string does not name a known [`Level`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid log level '{0}', expected debug|info|warn|error|fatal")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Runtime-adjustable logging configuration.
struct Settings {
    level: Level,
    color: bool,
    filters: Vec<String>,
}

struct Inner {
    settings: RwLock<Settings>,
    sink: Mutex<Box<dyn Write + Send>>,
}

/// Shared handle to the diagnostic sink.
///
/// Constructed once at startup and passed explicitly to every component;
/// clones share level threshold, color flag, filter list, and sink.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Logger writing to stderr, threshold `Info`, colorless, unfiltered.
    pub fn stderr() -> Self {
        Self::with_sink(Box::new(io::stderr()))
    }

    /// Logger that drops everything. Handy for tests.
    pub fn discard() -> Self {
        Self::with_sink(Box::new(io::sink()))
    }

    /// Logger writing to an arbitrary sink.
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Logger {
            inner: Arc::new(Inner {
                settings: RwLock::new(Settings {
                    level: Level::Info,
                    color: false,
                    filters: Vec::new(),
                }),
                sink: Mutex::new(sink),
            }),
        }
    }

    /// Current level threshold.
    pub fn level(&self) -> Level {
        self.read_settings().level
    }

    /// Sets the level threshold; messages below it are dropped.
    pub fn set_level(&self, level: Level) {
        self.write_settings().level = level;
    }

    /// Enables or disables ANSI colorization.
    pub fn set_color(&self, color: bool) {
        self.write_settings().color = color;
    }

    /// Replaces the ordered filter list.
    pub fn set_filters(&self, filters: Vec<String>) {
        self.write_settings().filters = filters;
    }

    /// Appends one filter substring.
    pub fn add_filter(&self, filter: impl Into<String>) {
        self.write_settings().filters.push(filter.into());
    }

    /// Format-interpolating emit. An empty `name` substitutes the caller's
    /// source location in the prologue.
    #[track_caller]
    pub fn emit(&self, level: Level, name: &str, body: fmt::Arguments<'_>) {
        let location = Location::caller();
        self.emit_at(level, name, location.file(), location.line(), body);
    }

    /// Concatenating emit: `parts` are rendered back to back, without
    /// interpolation or separators.
    #[track_caller]
    pub fn emit_line(&self, level: Level, name: &str, parts: &[&dyn fmt::Display]) {
        let location = Location::caller();
        self.emit_line_at(level, name, location.file(), location.line(), parts);
    }

    /// [`emit`](Self::emit) with an explicit call-site coordinate. The
    /// per-level macros expand to this so the reported location is the
    /// macro invocation, not the expansion.
    pub fn emit_at(&self, level: Level, name: &str, file: &str, line: u32, body: fmt::Arguments<'_>) {
        self.write_record(level, name, file, line, &body.to_string());
    }

    /// [`emit_line`](Self::emit_line) with an explicit call-site coordinate.
    pub fn emit_line_at(
        &self,
        level: Level,
        name: &str,
        file: &str,
        line: u32,
        parts: &[&dyn fmt::Display],
    ) {
        let mut body = String::new();
        for part in parts {
            use fmt::Write as _;
            let _ = write!(body, "{part}");
        }
        self.write_record(level, name, file, line, &body);
    }

    fn write_record(&self, level: Level, name: &str, file: &str, line: u32, body: &str) {
        let settings = self.read_settings();
        if level < settings.level {
            return;
        }

        let msg = render(level, name, file, line, body, settings.color);
        // Filters act on the rendered text, prologue and colors included.
        if settings.filters.iter().any(|f| msg.contains(f.as_str())) {
            return;
        }
        drop(settings);

        let mut sink = self
            .inner
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(sink, "{msg}");
        let _ = sink.flush();
    }

    fn read_settings(&self) -> std::sync::RwLockReadGuard<'_, Settings> {
        self.inner
            .settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_settings(&self) -> std::sync::RwLockWriteGuard<'_, Settings> {
        self.inner
            .settings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.read_settings();
        f.debug_struct("Logger")
            .field("level", &settings.level)
            .field("color", &settings.color)
            .field("filters", &settings.filters)
            .finish_non_exhaustive()
    }
}

fn render(level: Level, name: &str, file: &str, line: u32, body: &str, color: bool) -> String {
    use fmt::Write as _;

    let mut msg = String::new();
    if color {
        msg.push_str(COLOR_LINE);
    }
    msg.push_str(level.tag());
    msg.push(' ');
    if name.is_empty() {
        let short = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let _ = write!(msg, "{short}:{line}");
    } else {
        msg.push_str(name);
    }
    msg.push_str(": ");
    if color {
        msg.push_str(level.color());
    }
    msg.push_str(body);
    if color {
        msg.push_str(COLOR_RESET);
    }
    msg
}

/// Logs a formatted message at DEBUG.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_at($crate::Level::Debug, "", ::std::file!(), ::std::line!(), ::std::format_args!($($arg)*))
    };
}

/// Logs a formatted message at INFO.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_at($crate::Level::Info, "", ::std::file!(), ::std::line!(), ::std::format_args!($($arg)*))
    };
}

/// Logs a formatted message at WARN.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_at($crate::Level::Warn, "", ::std::file!(), ::std::line!(), ::std::format_args!($($arg)*))
    };
}

/// Logs a formatted message at ERROR.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_at($crate::Level::Error, "", ::std::file!(), ::std::line!(), ::std::format_args!($($arg)*))
    };
}

/// Logs a formatted message at FATAL. Exiting afterwards is the caller's
/// decision; the logger itself never aborts.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_at($crate::Level::Fatal, "", ::std::file!(), ::std::line!(), ::std::format_args!($($arg)*))
    };
}

/// Logs concatenated values at DEBUG.
#[macro_export]
macro_rules! debugln {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.emit_line_at($crate::Level::Debug, "", ::std::file!(), ::std::line!(), &[$(&$part as &dyn ::std::fmt::Display),*])
    };
}

/// Logs concatenated values at INFO.
#[macro_export]
macro_rules! infoln {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.emit_line_at($crate::Level::Info, "", ::std::file!(), ::std::line!(), &[$(&$part as &dyn ::std::fmt::Display),*])
    };
}

/// Logs concatenated values at WARN.
#[macro_export]
macro_rules! warnln {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.emit_line_at($crate::Level::Warn, "", ::std::file!(), ::std::line!(), &[$(&$part as &dyn ::std::fmt::Display),*])
    };
}

/// Logs concatenated values at ERROR.
#[macro_export]
macro_rules! errorln {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.emit_line_at($crate::Level::Error, "", ::std::file!(), ::std::line!(), &[$(&$part as &dyn ::std::fmt::Display),*])
    };
}

/// Logs concatenated values at FATAL.
#[macro_export]
macro_rules! fatalln {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.emit_line_at($crate::Level::Fatal, "", ::std::file!(), ::std::line!(), &[$(&$part as &dyn ::std::fmt::Display),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        fn line_count(&self) -> usize {
            self.contents().lines().count()
        }
    }

    fn capture() -> (Logger, SharedBuf) {
        let buf = SharedBuf::default();
        let logger = Logger::with_sink(Box::new(buf.clone()));
        (logger, buf)
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Fatal".parse::<Level>().unwrap(), Level::Fatal);
        assert!("verbose".parse::<Level>().is_err());
        assert_eq!(Level::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_emit_reaches_sink() {
        let (logger, buf) = capture();
        info!(logger, "device {} up", "r1");
        let out = buf.contents();
        assert!(out.starts_with("INFO "), "got: {out}");
        assert!(out.contains("device r1 up"));
    }

    #[test]
    fn test_named_prologue() {
        let (logger, buf) = capture();
        logger.emit(Level::Warn, "parser", format_args!("odd line"));
        assert_eq!(buf.contents(), "WARN parser: odd line\n");
    }

    #[test]
    fn test_empty_name_substitutes_call_site() {
        let (logger, buf) = capture();
        info!(logger, "hello");
        let out = buf.contents();
        // Base file name and a line number, no directory components.
        assert!(out.starts_with("INFO lib.rs:"), "got: {out}");
        assert!(!out.contains('/'));
    }

    #[test]
    fn test_level_threshold_drops_below() {
        let (logger, buf) = capture();
        logger.set_level(Level::Warn);
        debug!(logger, "dropped");
        info!(logger, "dropped too");
        warn!(logger, "kept");
        let out = buf.contents();
        assert!(!out.contains("dropped"));
        assert!(out.contains("kept"));
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_filter_suppresses_matching_messages() {
        let (logger, buf) = capture();
        logger.add_filter("noisy");
        info!(logger, "a noisy message");
        info!(logger, "a quiet message");
        logger.emit(Level::Error, "worker", format_args!("noisy here as well"));
        let out = buf.contents();
        assert!(!out.contains("noisy"));
        assert!(out.contains("a quiet message"));
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_filter_matches_rendered_prologue() {
        let (logger, buf) = capture();
        logger.set_level(Level::Debug);
        // The tag is part of the rendered message, so it is filterable.
        logger.add_filter("DEBUG ");
        debug!(logger, "invisible");
        info!(logger, "visible");
        let out = buf.contents();
        assert!(!out.contains("invisible"));
        assert!(out.contains("visible"));
    }

    #[test]
    fn test_empty_filter_set_delivers_every_message() {
        let (logger, buf) = capture();
        logger.set_level(Level::Debug);
        debug!(logger, "one");
        infoln!(logger, "two");
        logger.emit(Level::Fatal, "tag", format_args!("three"));
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_emit_line_concatenates_without_separators() {
        let (logger, buf) = capture();
        infoln!(logger, "flushed ", 3, " records for ", "r1");
        assert!(buf.contents().contains("flushed 3 records for r1"));

        logger.emit_line(Level::Info, "sync", &[&"count=", &7]);
        assert!(buf.contents().contains("INFO sync: count=7"));
    }

    #[test]
    fn test_color_wraps_tag_and_body() {
        let (logger, buf) = capture();
        logger.set_color(true);
        info!(logger, "tinted");
        let out = buf.contents();
        assert!(out.starts_with(COLOR_LINE));
        assert!(out.contains(COLOR_INFO));
        assert!(out.trim_end().ends_with(COLOR_RESET));
    }

    #[test]
    fn test_color_off_is_plain() {
        let (logger, buf) = capture();
        error!(logger, "plain");
        assert!(!buf.contents().contains('\x1b'));
    }

    #[test]
    fn test_clones_share_configuration() {
        let (logger, buf) = capture();
        let clone = logger.clone();
        clone.set_level(Level::Error);
        info!(logger, "suppressed via clone's threshold");
        assert_eq!(buf.line_count(), 0);
        assert_eq!(logger.level(), Level::Error);
    }

    #[test]
    fn test_concurrent_writers_do_not_interleave() {
        let (logger, buf) = capture();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        info!(logger, "worker {} message {}", worker, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(buf.line_count(), 8 * 50);
        for line in buf.contents().lines() {
            assert!(line.starts_with("INFO "), "interleaved line: {line}");
        }
    }
}
