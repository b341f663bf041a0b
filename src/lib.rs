//! # Rolling Log
//!
//! A minimal leveled logging facility: callers emit leveled, categorized
//! messages; the facility filters by severity threshold, formats entries,
//! and dispatches them to a destination: a callback, a colorized console,
//! a rolling log file, or a persistence store.
//!
//! The centerpiece is the rolling file naming engine: given a template with
//! a numeric placeholder run such as `logfile###.log`, it deterministically
//! computes the next unused, correctly padded file name by scanning the log
//! directory, so every new logger session lands on a fresh file.
//!
//! ## Module Overview
//!
//! - `level`: the severity model and the threshold write gate
//! - `entry`: the immutable log entry record and its canonical layout
//! - `format`: pluggable formatting strategies with failure fallback
//! - `logger`: the `Log` trait and the callback/console dispatcher
//! - `rolling`: next-file-name computation from a numbered template
//! - `file`: the rolling file sink and file-backed dispatcher
//! - `adapter`: bridge for third-party logging frameworks
//! - `store`: persistence collaborators receiving structured records
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use rolling_log::{FileLogger, Log, LogLevel};
//!
//! fn main() -> rolling_log::Result<()> {
//!     let mut logger = FileLogger::new()
//!         .with_template("session-##.log")
//!         .with_log_path("logs")
//!         .with_threshold(LogLevel::Information);
//!
//!     logger.log_information("service started", Some("Startup"))?;
//!     logger.log_warning("disk nearly full", None)?;
//!     logger.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! A logger instance is single-threaded and synchronous; all filesystem
//! calls are local and blocking. Name computation never reserves a number,
//! so it stays a pure function of the directory contents; the file sink
//! closes the resulting race at creation time with an exclusive-create
//! retry. Log files are opened with shared read access so external tools
//! can tail them while they are written.

/// Bridge for third-party logging frameworks
///
/// Maps external severity names onto the severity model, parses the
/// embedded `"|category|"` message convention, and forwards to a wrapped
/// file logger. Configured by an explicitly passed value, never by global
/// registration.
pub mod adapter;

/// The immutable log entry record
pub mod entry;

/// Typed errors for the logging facility
pub mod error;

/// Rolling file sink and file-backed dispatcher
///
/// Owns the one write handle to the bound log file for the logger's
/// lifetime: lazy bind on first write, append mode with shared read access,
/// flush per write, idempotent close.
pub mod file;

/// Formatting strategies
///
/// The `LogFormatter` trait plus the canonical and colorized
/// implementations. A failing formatter falls back to the canonical layout
/// instead of surfacing the failure.
pub mod format;

/// The severity model
///
/// An ordered enumeration from `None` (disable-all sentinel) to `Verbose`,
/// with the threshold write gate used by every dispatcher.
pub mod level;

/// The `Log` trait and the callback/console dispatcher
pub mod logger;

/// Rolling file name computation
///
/// Parses a numbered file name template, scans the base directory for
/// existing matches, and renders the next padded name in the sequence.
pub mod rolling;

/// Persistence collaborators
///
/// The `LogStore` trait, the flat `LogRecord` shape, a JSON-lines store,
/// and a store-backed dispatcher.
pub mod store;

pub use adapter::{AdapterConfig, FileLoggerAdapter};
pub use entry::{LogEntry, DEFAULT_CATEGORY};
pub use error::{LogError, Result};
pub use file::{FileLogger, FileSink};
pub use format::{ColorizedFormatter, DefaultFormatter, LogFormatter};
pub use level::LogLevel;
pub use logger::{Log, Logger};
pub use rolling::RollingLogFile;
pub use store::{JsonLineStore, LogRecord, LogStore, StoreLogger};

/// The current version of the crate, populated from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Default rolling file name template: three-digit padded sequence
    /// numbers with a `.log` extension.
    pub const FILE_NAME_TEMPLATE: &str = crate::rolling::DEFAULT_FILE_NAME_TEMPLATE;

    /// Default directory for rolling log files, relative to the working
    /// directory.
    pub const LOG_PATH: &str = crate::file::DEFAULT_LOG_PATH;

    /// Category recorded when an entry is created without one.
    pub const CATEGORY: &str = crate::entry::DEFAULT_CATEGORY;

    /// Default dispatcher threshold. `Verbose` accepts every emittable
    /// level; filtering is opt-in.
    pub const LOG_LEVEL: crate::level::LogLevel = crate::level::LogLevel::Verbose;
}
