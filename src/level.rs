use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from least to most verbose.
///
/// The ordinal values matter: a dispatcher writes an entry when the entry's
/// level is at or below the configured threshold, so `Verbose` as a threshold
/// accepts everything and `Critical` accepts only critical entries.
///
/// `None` is a sentinel that disables logging entirely when used as a
/// threshold. It is never a valid level for an individual message; a message
/// logged at `None` is constructed but never written.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum LogLevel {
    /// Nothing will be logged.
    None = 0,

    /// Critical errors that require the application to terminate.
    Critical = 1,

    /// Exceptional errors; the application continues although important
    /// functionality is unavailable.
    Error = 2,

    /// Warnings that indicate issues that ought to be addressed.
    Warning = 3,

    /// Informational events, such as successful initialization.
    Information = 4,

    /// Details useful for debugging or tracing through code execution.
    Verbose = 5,
}

impl LogLevel {
    /// Returns the level name as rendered in the entry layout.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "None",
            LogLevel::Critical => "Critical",
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Information => "Information",
            LogLevel::Verbose => "Verbose",
        }
    }

    /// Converts a raw ordinal to a level. Out-of-range values map to `None`
    /// (disable), never to an error.
    pub const fn from_ordinal(value: u8) -> LogLevel {
        match value {
            1 => LogLevel::Critical,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Information,
            5 => LogLevel::Verbose,
            _ => LogLevel::None,
        }
    }

    /// The write gate: an entry at `level` is written under `threshold` iff
    /// the level is not the `None` sentinel and is at most as verbose as the
    /// threshold.
    pub const fn enables(threshold: LogLevel, level: LogLevel) -> bool {
        !matches!(level, LogLevel::None) && level as u8 <= threshold as u8
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Verbose
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Parses both the canonical names and the names used by common logging
    /// frameworks (`trace`/`debug`/`all` collapse to `Verbose`, `fatal` to
    /// `Critical`). Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "critical" | "fatal" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "information" | "info" => Ok(LogLevel::Information),
            "verbose" | "all" | "trace" | "debug" => Ok(LogLevel::Verbose),
            other => Err(format!("unknown log level: {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        assert!(LogLevel::None < LogLevel::Critical);
        assert!(LogLevel::Critical < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Information);
        assert!(LogLevel::Information < LogLevel::Verbose);
    }

    #[test]
    fn test_gate_matrix() {
        use LogLevel::*;

        // For all thresholds T and levels L: write iff L != None && L <= T.
        let all = [None, Critical, Error, Warning, Information, Verbose];
        for &threshold in &all {
            for &level in &all {
                let expected = level != None && level <= threshold;
                assert_eq!(
                    LogLevel::enables(threshold, level),
                    expected,
                    "threshold={threshold:?} level={level:?}"
                );
            }
        }
    }

    #[test]
    fn test_none_is_never_written() {
        assert!(!LogLevel::enables(LogLevel::Verbose, LogLevel::None));
        assert!(!LogLevel::enables(LogLevel::None, LogLevel::None));
    }

    #[test]
    fn test_from_ordinal_out_of_range_is_none() {
        assert_eq!(LogLevel::from_ordinal(3), LogLevel::Warning);
        assert_eq!(LogLevel::from_ordinal(6), LogLevel::None);
        assert_eq!(LogLevel::from_ordinal(255), LogLevel::None);
    }

    #[test]
    fn test_parse_framework_names() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Information);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert!("noise".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_matches_layout_names() {
        assert_eq!(LogLevel::Information.to_string(), "Information");
        assert_eq!(LogLevel::Verbose.to_string(), "Verbose");
    }
}
