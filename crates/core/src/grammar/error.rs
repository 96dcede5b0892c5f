use std::collections::BTreeMap;

use super::diag::{Diagnostic, Span, codes};

/// A fatal parse failure. No partial message is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The first segment is absent, is not MSH, or cannot yield a delimiter set.
    #[error("missing message header: {reason}")]
    MissingHeader {
        /// Why the header was rejected.
        reason: String,
        /// Source span of the offending line (empty at 0 for empty input).
        span: Span,
    },

    /// A line does not start with a well-formed segment type code.
    #[error("malformed segment on line {}: {line:?}", .line_index + 1)]
    MalformedSegment {
        /// The offending line, without its terminator.
        line: String,
        /// 0-based index of the line in the source text.
        line_index: usize,
        /// Source span of the offending line.
        span: Span,
    },
}

impl ParseError {
    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::MissingHeader { span, .. } | ParseError::MalformedSegment { span, .. } => {
                *span
            }
        }
    }

    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MissingHeader { .. } => codes::PARSER_MISSING_HEADER,
            ParseError::MalformedSegment { .. } => codes::PARSER_MALFORMED_SEGMENT,
        }
    }

    /// Convert into an error [`Diagnostic`] for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string(), Some(self.span()));
        match self {
            ParseError::MissingHeader { .. } => {
                diag.with_context(BTreeMap::from([("expected".into(), "MSH".into())]))
            }
            ParseError::MalformedSegment { line_index, .. } => {
                diag.with_context(BTreeMap::from([
                    ("expected".into(), "segment code".into()),
                    ("line".into(), (line_index + 1).to_string()),
                ]))
            }
        }
    }
}
