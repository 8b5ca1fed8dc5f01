//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One `<code>: <message>` line per diagnostic, colored by kind
//! - Summary with misconfiguration/mismatch breakdown

use crate::domain::Diagnostic;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn format_diagnostic(
        &self,
        diagnostic: &Diagnostic,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let code = diagnostic.code.as_str();
        if self.color {
            let code = if diagnostic.code.is_misconfiguration() {
                code.yellow().bold()
            } else {
                code.red().bold()
            };
            writeln!(writer, "{}: {}", code, diagnostic.message)
        } else {
            writeln!(writer, "{}: {}", code, diagnostic.message)
        }
    }

    /// Split the diagnostics into (misconfigurations, mismatches)
    fn count_by_kind(&self, diagnostics: &[Diagnostic]) -> (usize, usize) {
        let misconfigured = diagnostics
            .iter()
            .filter(|d| d.code.is_misconfiguration())
            .count();
        (misconfigured, diagnostics.len() - misconfigured)
    }

    fn format_summary(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if diagnostics.is_empty() {
            return if self.color {
                writeln!(writer, "{} {}", "✓".green(), "All version checks passed")
            } else {
                writeln!(writer, "All version checks passed")
            };
        }

        let total = diagnostics.len();
        let (misconfigured, mismatched) = self.count_by_kind(diagnostics);

        let mut line = if self.color {
            format!("{} {} issue(s) found", "✗".red(), total.to_string().red())
        } else {
            format!("{} issue(s) found", total)
        };

        if self.verbosity == Verbosity::Verbose {
            let mut parts = Vec::new();
            if misconfigured > 0 {
                parts.push(format!("{} misconfigured", misconfigured));
            }
            if mismatched > 0 {
                parts.push(format!("{} out of range", mismatched));
            }
            line.push_str(&format!(" ({})", parts.join(", ")));
        }

        writeln!(writer, "{}", line)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, diagnostics: &[Diagnostic], writer: &mut dyn Write) -> std::io::Result<()> {
        for diagnostic in diagnostics {
            self.format_diagnostic(diagnostic, writer)?;
        }

        // In quiet mode, only show diagnostics
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if !diagnostics.is_empty() {
            writeln!(writer)?;
        }
        self.format_summary(diagnostics, writer)
    }
}
