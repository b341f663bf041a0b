use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use crate::format::LogFormatter;
use crate::level::LogLevel;
use crate::logger::Log;
use crate::rolling::{RollingLogFile, DEFAULT_FILE_NAME_TEMPLATE};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default directory for rolling log files, relative to the working
/// directory.
pub const DEFAULT_LOG_PATH: &str = "logs";

const LINE_TERMINATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Upper bound on scan-compute-open attempts when racing writers keep
/// claiming the computed name first.
const MAX_BIND_ATTEMPTS: usize = 100;

/// Owns the one write handle to a rolling log file.
///
/// The sink is lazy: nothing touches the filesystem until the first
/// [`append`], which creates the base directory if absent, binds the next
/// rolling file name, and opens the file in append mode with shared read
/// access so external tools can tail it. The sink keeps that handle, and
/// writes to that file, for the rest of its lifetime.
///
/// Binding uses exclusive creation (`create_new`) and retries the
/// scan-compute-open sequence when another writer claims the name first, so
/// two sinks racing on one directory end up on distinct files. A name that
/// was resolved earlier, through [`current_file_name`] or [`set_file_name`],
/// is opened in plain append mode instead, preserving the bind-once
/// contract.
///
/// Dropping the sink releases the handle; callers that care about flush
/// errors should call [`close`] explicitly.
///
/// [`append`]: FileSink::append
/// [`close`]: FileSink::close
/// [`current_file_name`]: FileSink::current_file_name
/// [`set_file_name`]: FileSink::set_file_name
pub struct FileSink {
    log_path: PathBuf,
    template: String,
    file_name: Option<String>,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(template: impl Into<String>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            template: template.into(),
            file_name: None,
            writer: None,
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The file name this sink is bound to, computing and caching it if
    /// necessary. The computation requires the base directory to exist.
    pub fn current_file_name(&mut self) -> Result<&str> {
        if self.file_name.is_none() {
            let name =
                RollingLogFile::new(self.template.clone(), self.log_path.clone()).next_file_name()?;
            self.file_name = Some(name);
        }

        // populated above
        Ok(self.file_name.as_deref().unwrap_or_default())
    }

    /// Pins the sink to an explicit file name instead of a computed one.
    /// Has no effect on a handle that is already open.
    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = Some(name.into());
    }

    /// Full path of the bound file (binding it first if needed).
    pub fn full_path(&mut self) -> Result<PathBuf> {
        let name = self.current_file_name()?.to_string();
        Ok(self.log_path.join(name))
    }

    /// Whether the bound file currently exists on disk.
    pub fn exists(&mut self) -> Result<bool> {
        Ok(self.full_path()?.exists())
    }

    /// Appends `text` followed by the platform line terminator, flushing
    /// before returning. Flush failures surface; nothing is retried.
    pub fn append(&mut self, text: &str) -> Result<()> {
        if self.writer.is_none() {
            self.open_writer()?;
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(text.as_bytes())?;
            writer.write_all(LINE_TERMINATOR.as_bytes())?;
            writer.flush()?;
        }

        Ok(())
    }

    /// Flushes and releases the write handle. Calling this when already
    /// closed, or before anything was written, is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        Ok(())
    }

    /// Deletes the bound file iff it exists; not an error when it does not.
    /// The handle is released first so the unlink also works on platforms
    /// with mandatory share locking.
    pub fn try_delete(&mut self) -> Result<()> {
        self.close()?;

        let path = self.full_path()?;
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(file = %path.display(), "deleted log file");
        }

        Ok(())
    }

    fn open_writer(&mut self) -> Result<()> {
        fs::create_dir_all(&self.log_path)?;

        // A name resolved earlier is appended to as-is; the race mitigation
        // below only applies to a fresh binding.
        if let Some(name) = self.file_name.clone() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.log_path.join(&name))?;
            self.writer = Some(BufWriter::new(file));
            return Ok(());
        }

        let namer = RollingLogFile::new(self.template.clone(), self.log_path.clone());

        for _ in 0..MAX_BIND_ATTEMPTS {
            let name = namer.next_file_name()?;

            match OpenOptions::new()
                .create_new(true)
                .append(true)
                .open(self.log_path.join(&name))
            {
                Ok(file) => {
                    debug!(file = %name, "bound rolling log file");
                    self.file_name = Some(name);
                    self.writer = Some(BufWriter::new(file));
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(file = %name, "lost creation race, recomputing");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(LogError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "could not bind a fresh rolling log file",
        )))
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// A dispatcher that writes formatted entries to a rolling log file.
///
/// Each logger instance binds to exactly one computed file name for its
/// entire lifetime; a new logger is a new logging session and gets the next
/// file in the sequence.
pub struct FileLogger {
    threshold: LogLevel,
    formatter: Option<Box<dyn LogFormatter>>,
    sink: FileSink,
}

impl FileLogger {
    /// Creates a file logger with the default template (`logfile###.log`),
    /// the default log path (`logs`), and a `Verbose` threshold.
    pub fn new() -> Self {
        Self {
            threshold: LogLevel::default(),
            formatter: None,
            sink: FileSink::new(DEFAULT_FILE_NAME_TEMPLATE, DEFAULT_LOG_PATH),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.sink = FileSink::new(template, self.sink.log_path.clone());
        self
    }

    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.sink = FileSink::new(self.sink.template.clone(), log_path);
        self
    }

    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_formatter(mut self, formatter: impl LogFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    pub fn log_path(&self) -> &Path {
        self.sink.log_path()
    }

    pub fn template(&self) -> &str {
        self.sink.template()
    }

    /// The rolling file name this logger is bound to (binding it if needed).
    pub fn current_file_name(&mut self) -> Result<String> {
        Ok(self.sink.current_file_name()?.to_string())
    }

    pub fn full_path(&mut self) -> Result<PathBuf> {
        self.sink.full_path()
    }

    pub fn exists(&mut self) -> Result<bool> {
        self.sink.exists()
    }

    pub fn try_delete_file(&mut self) -> Result<()> {
        self.sink.try_delete()
    }

    pub fn close(&mut self) -> Result<()> {
        self.sink.close()
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for FileLogger {
    fn log(
        &mut self,
        message: &str,
        level: LogLevel,
        category: Option<&str>,
    ) -> Result<LogEntry> {
        let entry = LogEntry::new(message, level, category)?;

        if LogLevel::enables(self.threshold, level) {
            let output = entry.render(self.formatter.as_deref());
            self.sink.append(&output)?;
        }

        Ok(entry)
    }
}
