use parking_lot::Mutex;
/// Debugging infrastructure for tutor-render
///
/// Controlled by DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (config, CLI events)
/// - 3: Debug level (rule hits and misses, block decisions)
/// - 4: Trace level (every line decision, message excerpts)
///
/// All output goes to `tutor_render_debug.log` in the system temp directory,
/// keeping rendered output on stdout clean.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(val.trim().parse::<u8>().unwrap_or(0)),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(n: u8) -> Self {
        match n {
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            4 => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    /// Map a `log` crate level onto the debug file levels.
    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }

    fn from_level_filter(filter: log::LevelFilter) -> Self {
        filter
            .to_level()
            .map_or(DebugLevel::Off, Self::from_log_level)
    }

    /// The `log` filter that lets through everything this level writes.
    fn as_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Warn,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Fixed-width tag written in front of each line.
    fn tag(self) -> &'static str {
        match self {
            DebugLevel::Off => "",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        Self::with_level(DebugLevel::from_env())
    }

    fn with_level(level: DebugLevel) -> Self {
        if level == DebugLevel::Off {
            return DebugLogger { level, file: None };
        }

        let log_path = std::env::temp_dir().join("tutor_render_debug.log");
        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&log_path)
        {
            Ok(f) => {
                let mut logger = DebugLogger {
                    level,
                    file: Some(f),
                };
                logger.write_raw(&format!(
                    "\n{rule}\ntutor-render {} debug session started at {} (level={:?})\n{rule}\n",
                    crate::VERSION,
                    timestamp(),
                    level,
                    rule = "=".repeat(80)
                ));
                logger
            }
            // Silently disable file output if the log can't be opened.
            Err(_e) => DebugLogger { level, file: None },
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level == DebugLevel::Off || level > self.level {
            return;
        }
        let line = format!("[{}] [{}] [{category}] {msg}\n", timestamp(), level.tag());
        self.write_raw(&line);
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level != DebugLevel::Off && level <= logger().lock().level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    logger().lock().log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

// ---------------------------------------------------------------------------
// `log` crate bridge
// ---------------------------------------------------------------------------

/// Forwards `log::info!()` and friends into the debug file.
///
/// Records are mirrored to stderr when `RUST_LOG` is set.
struct LogBridge {
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("{}", record.args());
        log(
            DebugLevel::from_log_level(record.level()),
            record.target(),
            &msg,
        );
        if self.mirror_stderr {
            eprintln!("[{}] {}: {}", record.level(), record.target(), msg);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Route the `log` facade into the debug file.
///
/// Precedence for the level: explicit `level` (CLI flag), then `RUST_LOG`,
/// then `DEBUG_LEVEL`. Calling this more than once is harmless.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok());
    let filter = level
        .or(rust_log)
        .unwrap_or_else(|| DebugLevel::from_env().as_level_filter());

    // The file logger must be at least as verbose as the requested filter.
    let wanted = DebugLevel::from_level_filter(filter);
    {
        let mut current = logger().lock();
        if wanted > current.level {
            *current = DebugLogger::with_level(wanted);
        }
    }

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: rust_log.is_some(),
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(filter);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
