//! Rolling log file name computation.
//!
//! A rolling file name template has the form `basename###[.ext]`: a literal
//! base part, a run of `#` placeholders fixing the minimum width of the
//! numeric field, and an optional dotted extension. For example:
//!
//! - `"testlog#.log"` generates `testlog1.log`, `testlog2.log`, ...
//!   `testlog10.log` (no padding beyond one digit)
//! - `"logfile-###.log"` generates `logfile-001.log` ... `logfile-999.log`,
//!   then `logfile-1000.log` (the number outgrew the width, so padding stops
//!   adding zeros but never truncates)
//!
//! The next name is always derived fresh from the directory contents, never
//! from state carried between calls or processes. Computing a name reserves
//! nothing; see [`FileSink`] for how the race between two writers computing
//! the same name is closed at file-creation time.
//!
//! [`FileSink`]: crate::file::FileSink

use crate::error::{LogError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default rolling file name template.
pub const DEFAULT_FILE_NAME_TEMPLATE: &str = "logfile###.log";

/// Grammar for a numbered file name template: literal base part, at least
/// one contiguous `#`, optional dotted extension suffix. Anchored at both
/// ends so a template with trailing junk is invalid rather than silently
/// truncated.
static TEMPLATE_GRAMMAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ .A-Za-z0-9_-]+)(#+)((?:\.[A-Za-z0-9_-]+)*)$").unwrap());

/// The three template parts, derived per computation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TemplateParts {
    base: String,
    width: usize,
    extension: String,
}

impl TemplateParts {
    fn decompose(template: &str) -> Result<Self> {
        let caps = TEMPLATE_GRAMMAR
            .captures(template)
            .ok_or_else(|| LogError::InvalidTemplate(template.to_string()))?;

        Ok(Self {
            base: caps[1].to_string(),
            width: caps[2].len(),
            extension: caps[3].to_string(),
        })
    }

    /// True when `name` matches the template with every `#` treated as a
    /// single-character wildcard, i.e. the candidate filter a directory glob
    /// would apply. The numeric field must occupy exactly `width` characters
    /// here; whether those characters parse as a number is decided later.
    fn matches_candidate(&self, name: &str) -> bool {
        name.strip_prefix(self.base.as_str())
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
            .map(|middle| middle.chars().count() == self.width)
            .unwrap_or(false)
    }

    /// Regex extracting the numeric field from a candidate name: the hash
    /// run replaced by a `(\d+)` capture, the base and extension kept as
    /// literal anchors.
    fn number_pattern(&self) -> Regex {
        let pattern = format!(
            "^{}(\\d+){}$",
            regex::escape(&self.base),
            regex::escape(&self.extension)
        );

        // Escaped literals around a digit capture always form a valid pattern.
        Regex::new(&pattern).expect("numeric extraction pattern")
    }

    fn render(&self, number: u64) -> String {
        format!(
            "{}{:0width$}{}",
            self.base,
            number,
            self.extension,
            width = self.width
        )
    }
}

/// Computes rolling log file names from a template and a base directory.
///
/// `next_file_name` is a pure function of the directory contents at call
/// time: calling it twice without creating a file in between returns the
/// same name both times.
#[derive(Debug, Clone)]
pub struct RollingLogFile {
    template: String,
    base_path: PathBuf,
}

impl RollingLogFile {
    pub fn new(template: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            base_path: base_path.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Checks the template against the numbered-file grammar, then checks
    /// that the base path exists as a directory. A malformed template fails
    /// before any directory access.
    pub fn validate(&self) -> Result<()> {
        TemplateParts::decompose(&self.template)?;

        if !self.base_path.is_dir() {
            return Err(LogError::BasePathMissing(self.base_path.clone()));
        }

        Ok(())
    }

    /// Returns the name to use for the next rolling log file.
    ///
    /// The numeric part is one greater than the highest number found among
    /// the matching files in the base path, or `1` when there are none, and
    /// is zero-padded to the width of the template's `#` run. A number whose
    /// decimal form outgrew that width is rendered in full.
    ///
    /// Only the top level of the directory is scanned. Candidates whose
    /// numeric field does not parse as an unsigned integer are skipped, not
    /// errors. The returned value is a file name only; callers join it onto
    /// the base path.
    pub fn next_file_name(&self) -> Result<String> {
        let parts = TemplateParts::decompose(&self.template)?;

        if !self.base_path.is_dir() {
            return Err(LogError::BasePathMissing(self.base_path.clone()));
        }

        let number_pattern = parts.number_pattern();
        let mut max = 0u64;

        for dir_entry in fs::read_dir(&self.base_path)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };

            if !parts.matches_candidate(name) {
                continue;
            }

            if let Some(caps) = number_pattern.captures(name) {
                if let Ok(value) = caps[1].parse::<u64>() {
                    max = max.max(value);
                }
            }
        }

        let next = max + 1;
        debug!(
            template = %self.template,
            path = %self.base_path.display(),
            next,
            "computed next rolling file name"
        );

        Ok(parts.render(next))
    }
}

impl Default for RollingLogFile {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME_TEMPLATE, ".")
    }
}
