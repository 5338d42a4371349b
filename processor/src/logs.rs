//! Progress logging for batch runs.
//!
//! One line per event, prefixed by level and indented under the file it
//! belongs to:
//!
//! ```text
//!     [1/2] zone1.csv
//!        Read 2 rows, 3 columns (utf-8)
//!    ✓ zone1.csv → outputs/zone1.csv
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// A single log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting under the current file
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    /// Batch position header, e.g. `[2/5] zone2.csv`
    pub fn progress(position: usize, total: usize, file_name: &str) -> Self {
        Self::new(LogLevel::Info, format!("[{}/{}] {}", position, total, file_name))
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Print to stdout, or stderr for warnings and errors
    pub fn emit(&self) {
        match self.level {
            LogLevel::Info | LogLevel::Success => println!("{}", self),
            LogLevel::Warning | LogLevel::Error => eprintln!("{}", self),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "   ".repeat(self.indent as usize);
        write!(f, "{}{} {}", indent, self.level.prefix(), self.message)
    }
}

pub fn log_progress(position: usize, total: usize, file_name: &str) {
    LogEntry::progress(position, total, file_name).emit();
}

pub fn log_info(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Info, msg).emit();
}

pub fn log_success(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Success, msg).emit();
}

pub fn log_warning(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Warning, msg).emit();
}

pub fn log_error(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Error, msg).emit();
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LogEntry::new(LogLevel::Info, msg).with_indent(indent).emit();
}
