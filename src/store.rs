use crate::entry::LogEntry;
use crate::error::Result;
use crate::level::LogLevel;
use crate::logger::Log;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

/// Destination for fully-constructed log entries, e.g. a database table or
/// a structured file. Implementations receive every entry that passed the
/// write gate.
pub trait LogStore {
    fn write(&mut self, entry: &LogEntry) -> Result<()>;
}

/// A flat, self-describing persistence record derived from a [`LogEntry`].
///
/// The level is stored both by name and by ordinal so stores can be queried
/// by range without knowing the enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level_name: String,
    pub level_value: u8,
    pub category: String,
    pub message: String,
}

impl LogRecord {
    pub fn from_entry(entry: &LogEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: entry.timestamp(),
            level_name: entry.level().to_string(),
            level_value: entry.level() as u8,
            category: entry.category().to_string(),
            message: entry.message().to_string(),
        }
    }
}

/// A store appending one JSON record per line, flushed per write.
///
/// The file and its parent directory are created lazily on the first write;
/// the handle is then kept for the store's lifetime.
pub struct JsonLineStore {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl JsonLineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Flushes and releases the handle. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        Ok(())
    }
}

impl LogStore for JsonLineStore {
    fn write(&mut self, entry: &LogEntry) -> Result<()> {
        if self.writer.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }

            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            self.writer = Some(BufWriter::new(file));
        }

        if let Some(writer) = self.writer.as_mut() {
            let json = serde_json::to_string(&LogRecord::from_entry(entry))?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }

        Ok(())
    }
}

impl Drop for JsonLineStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// A dispatcher persisting entries to a [`LogStore`], gated by the same
/// threshold rule as every other dispatcher in this crate.
pub struct StoreLogger<S: LogStore> {
    threshold: LogLevel,
    store: S,
}

impl<S: LogStore> StoreLogger<S> {
    pub fn new(store: S, threshold: LogLevel) -> Self {
        Self { threshold, store }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: LogStore> Log for StoreLogger<S> {
    fn log(
        &mut self,
        message: &str,
        level: LogLevel,
        category: Option<&str>,
    ) -> Result<LogEntry> {
        let entry = LogEntry::new(message, level, category)?;

        if LogLevel::enables(self.threshold, level) {
            self.store.write(&entry)?;
        }

        Ok(entry)
    }
}
