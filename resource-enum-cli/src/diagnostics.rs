//! Diagnostic reporting.
//!
//! Generators never print. They report through a [`DiagnosticSink`] bound to
//! them by the registry, and the host decides what to do with the reports.

use std::fmt;
use std::sync::Mutex;

use crate::parser::Declaration;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        })
    }
}

/// A single reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// `file:line` of the declaration the report is about.
    pub subject: String,
    /// Name of the declaration the report is about.
    pub declaration: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} at {})",
            self.severity, self.message, self.declaration, self.subject
        )
    }
}

/// Receives diagnostics about declarations.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, severity: Severity, message: &str, subject: &Declaration);
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, severity: Severity, message: &str, subject: &Declaration) {
        let diagnostic = Diagnostic {
            severity,
            message: message.to_string(),
            subject: subject.location.to_string(),
            declaration: subject.name.clone(),
        };
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, severity: Severity, message: &str, subject: &Declaration) {
        let location = subject.location.to_string();
        match severity {
            Severity::Error => {
                tracing::error!(declaration = %subject.name, %location, "{message}")
            }
            Severity::Warning => {
                tracing::warn!(declaration = %subject.name, %location, "{message}")
            }
            Severity::Note => {
                tracing::info!(declaration = %subject.name, %location, "{message}")
            }
        }
    }
}
