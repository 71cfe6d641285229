use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

const DEFAULT_LEVEL: LogLevel = if cfg!(debug_assertions) {
    LogLevel::Debug
} else {
    LogLevel::Info
};

impl Default for LogLevel {
    fn default() -> Self {
        DEFAULT_LEVEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`")]
pub struct UnknownLogLevel(String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LEVEL as u8);

/// Browser console logger tagging every line with the emitting component
pub struct Logger;

impl Logger {
    /// Drop messages below `level`
    pub fn set_max_level(level: LogLevel) {
        MAX_LEVEL.store(level as u8, Ordering::Relaxed);
    }

    pub fn max_level() -> LogLevel {
        LogLevel::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if level < Self::max_level() {
            return;
        }

        let line = format_line(component, message);
        Self::write(level, line);
    }

    #[cfg(target_arch = "wasm32")]
    fn write(level: LogLevel, line: String) {
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }

    // native test builds have no browser console
    #[cfg(not(target_arch = "wasm32"))]
    fn write(level: LogLevel, line: String) {
        eprintln!("{:?} {}", level, line);
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}
