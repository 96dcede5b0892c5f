//! Shared diagnostic model for the HL7 toolchain.
//!
//! Parse failures and message checks both produce [`Diagnostic`] values.
//! Each carries a stable code from [`codes`], an optional byte [`Span`] into
//! the input, and free-form context. [`LineIndex`] turns spans back into
//! segment line numbers for display.

#![warn(missing_docs)]

/// Stable diagnostic codes and their explanations.
pub mod codes;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Line lookup ─────────────────────────────────────────────────────────

/// Offset-to-line lookup over a raw HL7 message.
///
/// CR, LF and CRLF each end one line, so the same table works for messages
/// straight off the wire and for files edited on any platform. Positions
/// are 0-based.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Scan `text` and record where every line begins.
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((at, ch)) = chars.next() {
            let next = match ch {
                '\r' => match chars.peek() {
                    Some(&(lf, '\n')) => {
                        chars.next();
                        lf + 1
                    }
                    _ => at + 1,
                },
                '\n' => at + 1,
                _ => continue,
            };
            starts.push(next);
        }
        Self { starts }
    }

    /// Line and column of a byte offset. Offsets beyond the input land on
    /// the final line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&s| s <= offset).max(1) - 1;
        (line, offset - self.starts[line])
    }

    /// Where line `line` begins, if the input has that many lines.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Number of lines; empty input still has one.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

// ── Severity and span ───────────────────────────────────────────────────

/// How serious a diagnostic is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The message could not be parsed.
    Error,
    /// The message parsed, but a receiver would likely reject it.
    Warn,
    /// Worth knowing, nothing to fix.
    Info,
}

impl Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Half-open byte range `[start, end)` in the raw message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// First byte covered.
    pub start: usize,
    /// First byte after the range.
    pub end: usize,
}

impl Span {
    /// Range from `start` up to `end`. Panics when the bounds are reversed.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// Zero-width range at `at`, used to point between bytes.
    pub fn empty(at: usize) -> Self {
        Self::new(at, at)
    }

    /// Width in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-width range.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Diagnostic ──────────────────────────────────────────────────────────

/// One finding about a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Code from [`codes`], such as `HL71002`.
    pub id: Cow<'static, str>,
    /// How serious the finding is.
    pub severity: Severity,
    /// Text shown to the user.
    pub message: String,
    /// Where in the input the finding applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Extra key/value facts (segment code, line, expected value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Build a diagnostic with no context attached.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Diagnostic {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// [`Severity::Error`] diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// [`Severity::Warn`] diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// [`Severity::Info`] diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Replace the context map.
    pub fn with_context(self, context: BTreeMap<String, String>) -> Self {
        Diagnostic {
            context: Some(context),
            ..self
        }
    }

    /// True when the message could not be parsed.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Long-form help for this diagnostic's code.
    pub fn explain(&self) -> Option<&'static str> {
        codes::explain(&self.id)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Long-form help for a diagnostic code, or `None` for unknown codes.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explain(id)
}
