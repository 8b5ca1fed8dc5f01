//! JSON output formatter for machine processing
//!
//! Emits `{"ok": bool, "diagnostics": [{"id": ..., "msg": ...}]}`; verbose
//! mode adds a summary object.

use crate::domain::Diagnostic;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// True when no diagnostic was reported
    ok: bool,
    /// Diagnostics in report order
    diagnostics: &'a [Diagnostic],
    /// Breakdown (only in verbose mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<JsonSummary>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Number of E001/E002 diagnostics
    misconfigured: usize,
    /// Number of E003-E006 diagnostics
    out_of_range: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, diagnostics: &[Diagnostic], writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = (self.verbosity == Verbosity::Verbose).then(|| {
            let misconfigured = diagnostics
                .iter()
                .filter(|d| d.code.is_misconfiguration())
                .count();
            JsonSummary {
                misconfigured,
                out_of_range: diagnostics.len() - misconfigured,
            }
        });

        let output = JsonOutput {
            ok: diagnostics.is_empty(),
            diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
