use std::sync::LazyLock;

use super::{
    ast::{ParsedMessage, Segment, SegmentFields},
    error::ParseError,
    lexer::{RawSegment, SegmentTerminator, tokenize_with_terminator},
    tables::{SEGMENT_TYPE_KEY, SchemaSet},
};

/// Built-in schemas used by [`parse_str`].
static DEFAULT_SCHEMAS: LazyLock<SchemaSet> = LazyLock::new(SchemaSet::default);

/// Options controlling how text is split into segments.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Segment separator (default: carriage return).
    pub segment_separator: SegmentTerminator,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a CR-separated message with the built-in schemas.
pub fn parse_str(input: &str) -> Result<ParsedMessage, ParseError> {
    parse_with_schemas(input, &DEFAULT_SCHEMAS)
}

/// Parse a CR-separated message with the given schemas.
pub fn parse_with_schemas(input: &str, schemas: &SchemaSet) -> Result<ParsedMessage, ParseError> {
    parse_with_options(input, schemas, &ParseOptions::default())
}

/// Parse a message with the given schemas and options.
///
/// Fails with [`ParseError::MissingHeader`] or [`ParseError::MalformedSegment`];
/// there is no partial result. Segment types without a schema are legal and
/// carry only their `SegmentType` attribute.
pub fn parse_with_options(
    input: &str,
    schemas: &SchemaSet,
    options: &ParseOptions,
) -> Result<ParsedMessage, ParseError> {
    let tokens = tokenize_with_terminator(input, options.segment_separator)?;
    let segments: Vec<Segment> = tokens
        .segments
        .into_iter()
        .map(|raw| map_segment(raw, schemas))
        .collect();
    log::debug!(
        "parsed message with {} segments ({} without schema)",
        segments.len(),
        segments
            .iter()
            .filter(|s| !schemas.contains(&s.segment_type))
            .count()
    );
    Ok(ParsedMessage::new(tokens.delimiters, segments))
}

/// Map one raw segment to named attributes using its schema, if any.
///
/// Schema field *i* takes raw field *i* (1-based). Missing trailing fields
/// are left out; extra raw fields stay on the raw field list only.
pub fn map_segment(raw: RawSegment<'_>, schemas: &SchemaSet) -> Segment {
    let code = raw.segment_type();
    let schema = schemas.get(code);

    let named = schema.map_or(0, |s| s.fields.len().min(raw.fields.len() - 1));
    let mut parsed = SegmentFields::with_capacity(named + 1);
    parsed.push(SEGMENT_TYPE_KEY, code);
    if let Some(schema) = schema {
        for (name, value) in schema.fields.iter().zip(&raw.fields[1..]) {
            parsed.push(name.as_str(), *value);
        }
    }

    Segment {
        segment_type: code.to_string(),
        fields: raw.fields.iter().map(|f| f.to_string()).collect(),
        parsed,
        line_index: raw.line_index,
        span: raw.span,
    }
}
