//! Bridge for third-party logging frameworks.
//!
//! Frameworks hand over a severity *name* and a free-text message that may
//! carry an embedded `"|category| message"` prefix. The adapter maps the
//! name onto [`LogLevel`], splits the category out, and forwards to a
//! wrapped [`FileLogger`]. Configuration is an explicitly passed value;
//! there is no process-global registration.

use crate::entry::LogEntry;
use crate::error::Result;
use crate::file::FileLogger;
use crate::level::LogLevel;
use crate::logger::Log;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// Optional `"|category|"` prefix on a framework message. Whitespace around
/// the pipes and the category is not significant.
static CATEGORY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\|\s*([^|]*?)\s*\|\s*(.*)$").unwrap());

/// Splits the embedded category convention out of a framework message,
/// returning `(category, message)`. A missing or empty category yields
/// `None`.
pub fn split_category(text: &str) -> (Option<&str>, &str) {
    if let Some(caps) = CATEGORY_PREFIX.captures(text) {
        if let (Some(category), Some(message)) = (caps.get(1), caps.get(2)) {
            let category = category.as_str();
            let category = (!category.is_empty()).then_some(category);
            return (category, message.as_str());
        }
    }

    (None, text)
}

/// Adapter settings, passed by value at construction time. Every field is
/// optional; unset fields fall back to the file logger defaults.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Rolling file name template, e.g. `"logfile###.log"`.
    pub file_name_template: Option<String>,

    /// Directory receiving the rolling files.
    pub log_path: Option<PathBuf>,

    /// Threshold as a framework level name (`"trace"`, `"info"`, `"warn"`,
    /// `"error"`, `"fatal"`, ...). Absent or unrecognized names fall back to
    /// the most verbose setting.
    pub log_level: Option<String>,

    /// Category applied when a message carries no `"|category|"` prefix.
    pub default_category: Option<String>,
}

/// Translates framework severities and messages into file logger calls.
pub struct FileLoggerAdapter {
    logger: FileLogger,
    default_category: Option<String>,
}

impl FileLoggerAdapter {
    pub fn from_config(config: AdapterConfig) -> Self {
        let threshold = config
            .log_level
            .as_deref()
            .and_then(|name| name.parse::<LogLevel>().ok())
            .unwrap_or_default();

        let mut logger = FileLogger::new().with_threshold(threshold);
        if let Some(template) = config.file_name_template {
            logger = logger.with_template(template);
        }
        if let Some(path) = config.log_path {
            logger = logger.with_log_path(path);
        }

        Self {
            logger,
            default_category: config.default_category,
        }
    }

    /// Logs a framework message: maps the severity name (unrecognized names
    /// log at `Verbose`), splits the embedded category, applies the
    /// configured default category when none is embedded.
    pub fn write(&mut self, severity: &str, text: &str) -> Result<LogEntry> {
        let level = severity.parse::<LogLevel>().unwrap_or_default();
        let (category, message) = split_category(text);
        let category = category.or(self.default_category.as_deref());

        self.logger.log(message, level, category)
    }

    /// Whether entries at `level` would currently be written. A plain
    /// ordinal threshold comparison.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        LogLevel::enables(self.logger.threshold(), level)
    }

    pub fn logger_mut(&mut self) -> &mut FileLogger {
        &mut self.logger
    }

    pub fn close(&mut self) -> Result<()> {
        self.logger.close()
    }
}
