use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the logging facility.
///
/// Construction-time validation problems (`EmptyMessage`, `InvalidTemplate`,
/// `BasePathMissing`) are recoverable by correcting the input or the
/// configuration and retrying. `Io` failures on the write path are fatal to
/// that write attempt and are never retried internally.
#[derive(Debug, Error)]
pub enum LogError {
    /// `log` was called with an empty or all-whitespace message.
    #[error("log message must not be empty or whitespace")]
    EmptyMessage,

    /// The file name template does not match the numbered-file grammar
    /// (literal base, at least one contiguous `#`, optional dotted extension).
    #[error("invalid file name template: {0:?}")]
    InvalidTemplate(String),

    /// The configured base path does not exist as a directory.
    #[error("base path does not exist or is not a directory: {}", .0.display())]
    BasePathMissing(PathBuf),

    /// Filesystem failure while scanning a directory or creating, writing,
    /// or flushing a log file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A log record could not be serialized for a persistence store.
    #[error("failed to serialize log record")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogError>;
