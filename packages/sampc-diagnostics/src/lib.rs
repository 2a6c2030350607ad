use std::fmt;

use serde::Serialize;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A compiler diagnostic (error or warning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub category: String,
    pub message: String,
    /// Line of the token that was current when the problem was found.
    pub line: u32,
}

impl Diagnostic {
    /// Create a simple error diagnostic.
    pub fn error(code: &str, category: &str, message: &str, line: u32) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            line,
        }
    }

    /// Create a simple warning diagnostic.
    pub fn warning(code: &str, category: &str, message: &str, line: u32) -> Self {
        let mut diag = Self::error(code, category, message, line);
        diag.severity = Severity::Warning;
        diag
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}[{}]: {}", self.line, self.severity, self.code, self.message)
    }
}

/// Collector the compiler phases report into.
///
/// Errors are counted as they arrive; compilation keeps going after either
/// severity and the driver decides at the end whether to emit anything.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    errors: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.errors += 1;
        }
        self.items.push(diag);
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.items.len() - self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// Container for multiple diagnostics (for JSON output).
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticOutput {
    pub error_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticOutput {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            error_count,
            diagnostics,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Diagnostics> for DiagnosticOutput {
    fn from(diags: Diagnostics) -> Self {
        Self::new(diags.into_vec())
    }
}
