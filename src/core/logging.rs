//! Logging setup built on flexi_logger
//!
//! Console output by default, optional file output, and text/json formats.
//! Only the log level can change after initialization; format and output
//! destination are fixed by flexi_logger once started.

use colored::Colorize;
use flexi_logger::{DeferredNow, FileSpec, Logger, LoggerHandle};
use log::Record;

// Global handle so the level can be adjusted after startup
static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<LoggerHandle>> =
    std::sync::OnceLock::new();

fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] {}",
        now.format("%H:%M:%S"),
        record.level(),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = match record.level() {
        log::Level::Error => "ERROR".red().to_string(),
        log::Level::Warn => "WARN".yellow().to_string(),
        log::Level::Info => "INFO".green().to_string(),
        log::Level::Debug => "DEBUG".blue().to_string(),
        log::Level::Trace => "TRACE".magenta().to_string(),
    };
    write!(
        w,
        "{} [{}] {}",
        now.format("%H:%M:%S"),
        level,
        record.args()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
        "level": record.level().to_string(),
        "target": record.target(),
        "message": record.args().to_string(),
    });
    write!(w, "{}", line)
}

/// Initialize the global logger. Call once at startup, before any log output.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level_str = log_level.unwrap_or("info");

    let mut logger = Logger::try_with_str(level_str)?;

    match (log_format.unwrap_or("text"), color_enabled) {
        ("json", _) => logger = logger.format(json_format),
        (_, true) => logger = logger.format(simple_color_format),
        (_, false) => logger = logger.format(simple_format),
    }

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));
    Ok(())
}

/// Adjust the log level at runtime. Format and output destination cannot be
/// changed once the logger has started.
pub fn set_log_level(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger is not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}
