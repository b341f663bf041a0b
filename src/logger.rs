use crate::entry::LogEntry;
use crate::error::Result;
use crate::format::{ColorizedFormatter, LogFormatter};
use crate::level::LogLevel;
use tracing::trace;

/// The logging seam implemented by every dispatcher in this crate
/// ([`Logger`], [`FileLogger`], [`StoreLogger`]).
///
/// `log` always constructs and returns the [`LogEntry`] when the message is
/// valid, even when the entry is filtered out; only the write side effect is
/// gated by the threshold.
///
/// [`FileLogger`]: crate::file::FileLogger
/// [`StoreLogger`]: crate::store::StoreLogger
pub trait Log {
    /// Write the log entry to the output destination.
    ///
    /// Fails with [`LogError::EmptyMessage`] when `message` is empty or all
    /// whitespace; no entry is constructed in that case.
    ///
    /// [`LogError::EmptyMessage`]: crate::error::LogError::EmptyMessage
    fn log(&mut self, message: &str, level: LogLevel, category: Option<&str>)
        -> Result<LogEntry>;

    fn log_verbose(&mut self, message: &str, category: Option<&str>) -> Result<LogEntry> {
        self.log(message, LogLevel::Verbose, category)
    }

    fn log_information(&mut self, message: &str, category: Option<&str>) -> Result<LogEntry> {
        self.log(message, LogLevel::Information, category)
    }

    fn log_warning(&mut self, message: &str, category: Option<&str>) -> Result<LogEntry> {
        self.log(message, LogLevel::Warning, category)
    }

    fn log_error(&mut self, message: &str, category: Option<&str>) -> Result<LogEntry> {
        self.log(message, LogLevel::Error, category)
    }

    fn log_critical(&mut self, message: &str, category: Option<&str>) -> Result<LogEntry> {
        self.log(message, LogLevel::Critical, category)
    }
}

/// Sink callback invoked with each formatted line that passes the gate.
pub type SinkAction = Box<dyn FnMut(&str) + Send>;

/// A dispatcher that writes the formatted output of `log` calls to a
/// configurable sink action.
///
/// Without a sink the logger still constructs and returns entries; the
/// formatted line simply has nowhere to go. The threshold and formatter can
/// be swapped at any time between calls.
pub struct Logger {
    threshold: LogLevel,
    sink: Option<SinkAction>,
    formatter: Option<Box<dyn LogFormatter>>,
}

impl Logger {
    /// Creates a logger with no sink configured.
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            sink: None,
            formatter: None,
        }
    }

    /// Creates a logger that prints colorized lines to stdout.
    pub fn to_console(threshold: LogLevel) -> Self {
        Self::new(threshold)
            .with_formatter(ColorizedFormatter)
            .with_sink(|line| println!("{line}"))
    }

    /// Sets the sink action receiving each formatted line.
    pub fn with_sink(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets a custom formatting strategy. Formatter failures fall back to
    /// the canonical layout rather than surfacing to the caller.
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
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl Log for Logger {
    fn log(
        &mut self,
        message: &str,
        level: LogLevel,
        category: Option<&str>,
    ) -> Result<LogEntry> {
        let entry = LogEntry::new(message, level, category)?;

        if let Some(sink) = self.sink.as_mut() {
            if LogLevel::enables(self.threshold, level) {
                let output = entry.render(self.formatter.as_deref());
                sink(&output);
            } else {
                trace!(%level, threshold = %self.threshold, "entry filtered by threshold");
            }
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A logger whose sink stores the last line into the shared slot.
    fn capture_logger(threshold: LogLevel) -> (Logger, Arc<Mutex<Option<String>>>) {
        let output = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&output);
        let logger =
            Logger::new(threshold).with_sink(move |s| *slot.lock().unwrap() = Some(s.to_string()));
        (logger, output)
    }

    #[test]
    fn test_threshold_above_level_logs_output() {
        let (mut logger, output) = capture_logger(LogLevel::Verbose);

        logger.log("test", LogLevel::Information, None).unwrap();

        let output = output.lock().unwrap();
        assert!(output.as_ref().unwrap().ends_with("test"));
    }

    #[test]
    fn test_threshold_below_level_does_not_log_output() {
        let (mut logger, output) = capture_logger(LogLevel::Information);

        let entry = logger.log("test", LogLevel::Verbose, None).unwrap();

        // The entry is still constructed and returned; only the write is gated.
        assert_eq!(entry.message(), "test");
        assert!(output.lock().unwrap().is_none());
    }

    #[test]
    fn test_threshold_equal_to_level_logs_output() {
        let (mut logger, output) = capture_logger(LogLevel::Information);

        logger.log("test", LogLevel::Information, None).unwrap();

        let output = output.lock().unwrap();
        assert!(output.as_ref().unwrap().ends_with("test"));
    }

    #[test]
    fn test_none_level_is_never_written() {
        let (mut logger, output) = capture_logger(LogLevel::Verbose);

        let entry = logger.log("test", LogLevel::None, None).unwrap();

        assert_eq!(entry.level(), LogLevel::None);
        assert!(output.lock().unwrap().is_none());
    }

    #[test]
    fn test_none_threshold_disables_everything() {
        let (mut logger, output) = capture_logger(LogLevel::None);

        logger.log("test", LogLevel::Critical, None).unwrap();

        assert!(output.lock().unwrap().is_none());
    }

    #[test]
    fn test_empty_message_is_an_error() {
        let (mut logger, output) = capture_logger(LogLevel::Verbose);

        assert!(logger.log(" ", LogLevel::Information, None).is_err());
        assert!(output.lock().unwrap().is_none());
    }

    #[test]
    fn test_no_sink_still_returns_entry() {
        let mut logger = Logger::new(LogLevel::Verbose);

        let entry = logger.log("test", LogLevel::Information, Some("Init")).unwrap();

        assert_eq!(entry.category(), "Init");
    }

    #[test]
    fn test_default_format_shape() {
        let (mut logger, output) = capture_logger(LogLevel::Information);

        logger.log("test", LogLevel::Information, None).unwrap();

        // Entries render as "[<timestamp>][Information][<category>] test".
        let pattern = regex::Regex::new(r"^\[[^\]]*\]\[Information\]\[[^\]]*\] .*").unwrap();
        let output = output.lock().unwrap();
        assert!(pattern.is_match(output.as_ref().unwrap()));
    }

    #[test]
    fn test_console_logger_still_returns_entries() {
        // visual sink; assert only on the returned entry
        let mut logger = Logger::to_console(LogLevel::Information);

        let entry = logger.log("console smoke", LogLevel::Information, None).unwrap();
        assert_eq!(entry.level(), LogLevel::Information);
    }

    #[test]
    fn test_convenience_methods_pick_their_level() {
        let (mut logger, _) = capture_logger(LogLevel::Verbose);

        assert_eq!(
            logger.log_warning("w", None).unwrap().level(),
            LogLevel::Warning
        );
        assert_eq!(
            logger.log_critical("c", Some("Ops")).unwrap().level(),
            LogLevel::Critical
        );
        assert_eq!(
            logger.log_information("i", None).unwrap().level(),
            LogLevel::Information
        );
    }
}
