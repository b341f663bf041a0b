use crate::entry::LogEntry;
use crate::level::LogLevel;
use colored::Colorize;

/// Result type for formatter implementations.
///
/// A formatter failure is not fatal: the dispatcher swallows the error and
/// falls back to the canonical layout (see [`LogEntry::render`]).
pub type FormatResult = std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// Strategy for rendering a [`LogEntry`] to its output line.
pub trait LogFormatter: Send {
    fn format(&self, entry: &LogEntry) -> FormatResult;
}

/// The built-in formatter producing the canonical four-field layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl LogFormatter for DefaultFormatter {
    fn format(&self, entry: &LogEntry) -> FormatResult {
        Ok(entry.to_line())
    }
}

/// A formatter for colorizing console output based on level.
///
/// The entire line is colored according to its severity so console readers
/// can scan for problems at a glance. Used by [`Logger::to_console`].
///
/// [`Logger::to_console`]: crate::logger::Logger::to_console
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorizedFormatter;

impl LogFormatter for ColorizedFormatter {
    fn format(&self, entry: &LogEntry) -> FormatResult {
        let line = entry.to_line();

        let colored_output = match entry.level() {
            LogLevel::Critical => line.red().bold(),
            LogLevel::Error => line.red(),
            LogLevel::Warning => line.yellow(),
            LogLevel::Information => line.white(),
            LogLevel::Verbose | LogLevel::None => line.blue(),
        };

        Ok(colored_output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingFormatter;

    impl LogFormatter for FailingFormatter {
        fn format(&self, _entry: &LogEntry) -> FormatResult {
            Err("formatter exploded".into())
        }
    }

    struct UppercaseFormatter;

    impl LogFormatter for UppercaseFormatter {
        fn format(&self, entry: &LogEntry) -> FormatResult {
            Ok(entry.message().to_uppercase())
        }
    }

    #[test]
    fn test_default_formatter_matches_canonical_line() {
        let entry = LogEntry::new("test", LogLevel::Warning, None).unwrap();
        assert_eq!(DefaultFormatter.format(&entry).unwrap(), entry.to_line());
    }

    #[test]
    fn test_custom_formatter_is_used() {
        let entry = LogEntry::new("quiet", LogLevel::Information, None).unwrap();
        assert_eq!(entry.render(Some(&UppercaseFormatter)), "QUIET");
    }

    #[test]
    fn test_failing_formatter_falls_back_to_default() {
        let entry = LogEntry::new("test", LogLevel::Information, None).unwrap();
        assert_eq!(entry.render(Some(&FailingFormatter)), entry.to_line());
    }
}
