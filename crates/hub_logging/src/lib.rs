#![deny(missing_docs)]
//! Shared logging utilities for the summarize hub workspace.
//!
//! This crate provides the `hub_*` logging macros used across the codebase,
//! the logger setup used by the binary, and a minimal test initializer.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./summarize_hub.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! hub_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! hub_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! hub_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! hub_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! hub_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it first.
    File(PathBuf),
    /// Write to stderr. Stdout belongs to the terminal UI.
    Terminal,
    /// Write to both the file and the terminal.
    Both(PathBuf),
}

impl Default for LogDestination {
    fn default() -> Self {
        LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Initialize the global logger with the specified destination and level.
///
/// A second call is ignored. If the log file cannot be created the file
/// logger is skipped and a warning is printed to stderr.
pub fn initialize(destination: &LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                terminal_mode(),
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                terminal_mode(),
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn terminal_mode() -> TerminalMode {
    TerminalMode::Stderr
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_destination_is_the_log_file() {
        assert_eq!(
            LogDestination::default(),
            LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
        );
    }

    #[test]
    fn terminal_logging_stays_off_stdout() {
        assert!(matches!(terminal_mode(), TerminalMode::Stderr));
    }

    #[test]
    fn test_initializer_can_run_twice() {
        initialize_for_tests();
        initialize_for_tests();
        hub_debug!("logger initialized twice without error");
    }
}
