//! HL7 emitter: rejoins a parsed message into wire text.
//!
//! Fields are emitted byte-for-byte from the raw field list using the
//! message's own delimiters, so re-parsing the output yields the same
//! segment types and attributes. Only the segment terminator is normalized.

use super::ast::{ParsedMessage, Segment};
use super::delimiters::Delimiters;
use super::lexer::SegmentTerminator;

// ── Configuration ───────────────────────────────────────────────────────

/// Configuration for the HL7 emitter.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Terminator written after each segment.
    pub terminator: SegmentTerminator,
    /// Whether the last segment is followed by a terminator too.
    pub trailing_terminator: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            terminator: SegmentTerminator::Cr,
            trailing_terminator: true,
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Emit a parsed message as HL7 text.
pub fn emit_hl7(message: &ParsedMessage, config: &EmitConfig) -> String {
    let terminator = config.terminator.as_str();
    let mut out = String::new();
    for (i, segment) in message.segments().iter().enumerate() {
        if i > 0 {
            out.push_str(terminator);
        }
        emit_segment(&mut out, segment, message.delimiters());
    }
    if config.trailing_terminator && !message.is_empty() {
        out.push_str(terminator);
    }
    out
}

fn emit_segment(out: &mut String, segment: &Segment, delimiters: &Delimiters) {
    let fields = segment.fields();
    out.push_str(&fields[0]);
    // MSH-1 is the separator itself; writing it as a field would double it.
    let rest = if segment.segment_type() == "MSH" && fields.len() > 1 {
        &fields[2..]
    } else {
        &fields[1..]
    };
    for field in rest {
        out.push(delimiters.field);
        out.push_str(field);
    }
}
