use serde::{Deserialize, Serialize};

use super::delimiters::Delimiters;
use super::diag::Span;
use super::error::ParseError;
use super::tables::is_segment_code;

/// Character sequence that separates segments in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTerminator {
    /// Carriage return, the HL7 standard terminator.
    #[default]
    Cr,
    /// Line feed, common in files edited by hand.
    Lf,
    /// Carriage return + line feed.
    CrLf,
}

impl SegmentTerminator {
    /// The terminator as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentTerminator::Cr => "\r",
            SegmentTerminator::Lf => "\n",
            SegmentTerminator::CrLf => "\r\n",
        }
    }

    /// Guess the terminator of existing text: CR when the text contains one
    /// (which also covers CRLF, since stray LFs are trimmed), LF otherwise.
    pub fn detect(input: &str) -> Self {
        if input.contains('\r') {
            SegmentTerminator::Cr
        } else {
            SegmentTerminator::Lf
        }
    }
}

/// One source line split into raw fields, borrowing from the input.
///
/// `fields[0]` is the segment type code. For MSH segments the field
/// separator is reinserted as `fields[1]`, so positions line up with the
/// standard MSH-n numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment<'a> {
    /// Raw field strings, position 0 first.
    pub fields: Vec<&'a str>,
    /// 0-based index of the line in the source text.
    pub line_index: usize,
    /// Byte span of the line, without its terminator.
    pub span: Span,
}

impl<'a> RawSegment<'a> {
    /// The three-character segment type code.
    pub fn segment_type(&self) -> &'a str {
        self.fields[0]
    }
}

/// Output of the tokenizer: the message's delimiters and its raw segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// Delimiters declared by the MSH header.
    pub delimiters: Delimiters,
    /// Non-empty lines in source order.
    pub segments: Vec<RawSegment<'a>>,
}

/// Tokenize a message whose segments are separated by carriage returns.
pub fn tokenize(input: &str) -> Result<Tokens<'_>, ParseError> {
    tokenize_with_terminator(input, SegmentTerminator::Cr)
}

/// Tokenize a message with an explicit segment terminator.
///
/// Lines that are empty after trimming are skipped. Each remaining line has
/// stray `\r`/`\n` characters trimmed from both ends, so CRLF text splits
/// cleanly on CR. The first remaining line must be an MSH header; its
/// delimiters are then used for every line.
pub fn tokenize_with_terminator(
    input: &str,
    terminator: SegmentTerminator,
) -> Result<Tokens<'_>, ParseError> {
    let sep = terminator.as_str();
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for (line_index, raw) in input.split(sep).enumerate() {
        let start = offset;
        offset += raw.len() + sep.len();

        let trimmed_start = raw.trim_start_matches(is_line_break);
        let text = trimmed_start.trim_end_matches(is_line_break);
        if text.trim().is_empty() {
            continue;
        }
        let lead = raw.len() - trimmed_start.len();
        let span = Span::new(start + lead, start + lead + text.len());
        lines.push((line_index, span, text));
    }

    let Some(&(_, header_span, header)) = lines.first() else {
        return Err(ParseError::MissingHeader {
            reason: "message contains no segments".to_string(),
            span: Span::empty(0),
        });
    };
    if !header.starts_with("MSH") {
        let found: String = header.chars().take(3).collect();
        return Err(ParseError::MissingHeader {
            reason: format!("first segment starts with {found:?}, expected MSH"),
            span: header_span,
        });
    }
    let delimiters =
        Delimiters::from_header(header).ok_or_else(|| ParseError::MissingHeader {
            reason: format!(
                "header is {} characters long; at least {} are needed to declare delimiters",
                header.chars().count(),
                Delimiters::HEADER_LEN
            ),
            span: header_span,
        })?;
    let field_separator = &header[3..3 + delimiters.field.len_utf8()];

    let mut segments = Vec::with_capacity(lines.len());
    for (line_index, span, text) in lines {
        let mut fields: Vec<&str> = text.split(delimiters.field).collect();
        if !is_segment_code(fields[0]) {
            return Err(ParseError::MalformedSegment {
                line: text.to_string(),
                line_index,
                span,
            });
        }
        if fields[0] == "MSH" {
            // MSH-1 is the separator itself, which the split consumed.
            fields.insert(1, field_separator);
        }
        log::trace!(
            "line {}: {} with {} fields",
            line_index + 1,
            fields[0],
            fields.len() - 1
        );
        segments.push(RawSegment {
            fields,
            line_index,
            span,
        });
    }

    log::debug!("tokenized {} segments", segments.len());
    Ok(Tokens {
        delimiters,
        segments,
    })
}

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}
