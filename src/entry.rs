use crate::error::{LogError, Result};
use crate::format::LogFormatter;
use crate::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category used when an entry is created without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single log entry, immutable after construction.
///
/// Entries are created by a dispatcher on every accepted `log` call and
/// returned to the caller whether or not the write gate let them through;
/// only the sink side effect is filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    category: String,
    message: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current UTC time.
    ///
    /// Fails with [`LogError::EmptyMessage`] when `message` is empty or all
    /// whitespace. An unset or empty category is replaced by
    /// [`DEFAULT_CATEGORY`] so the rendered line never shows an empty
    /// bracket pair.
    pub fn new(message: &str, level: LogLevel, category: Option<&str>) -> Result<Self> {
        if message.trim().is_empty() {
            return Err(LogError::EmptyMessage);
        }

        let category = match category {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        };

        Ok(Self {
            timestamp: Utc::now(),
            level,
            category,
            message: message.to_string(),
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the canonical four-field layout:
    ///
    /// ```text
    /// [<timestamp>][<Level>][<Category>] <Message>
    /// ```
    ///
    /// Bracket characters inside the category or message are not escaped, so
    /// a category containing `]` renders ambiguously. That is an accepted
    /// property of the layout, not something this method tries to repair.
    pub fn to_line(&self) -> String {
        format!(
            "[{}][{}][{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level,
            self.category,
            self.message
        )
    }

    /// Renders through `formatter` when one is given, falling back to the
    /// canonical layout if the formatter fails. Formatting can never prevent
    /// a log call from producing a line.
    pub fn render(&self, formatter: Option<&dyn LogFormatter>) -> String {
        match formatter {
            Some(f) => f.format(self).unwrap_or_else(|_| self.to_line()),
            None => self.to_line(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
