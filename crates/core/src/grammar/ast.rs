use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::delimiters::Delimiters;
use super::diag::Span;

/// Named attributes of one segment, in schema order.
///
/// The first entry is always `SegmentType`. Values are the raw field strings;
/// split them on demand with [`split_data_field`](crate::split::split_data_field).
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFields {
    entries: Vec<(String, String)>,
}

impl SegmentFields {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Value of the named attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute names in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of attributes, including `SegmentType`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SegmentFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One parsed segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub(crate) segment_type: String,
    pub(crate) fields: Vec<String>,
    pub(crate) parsed: SegmentFields,
    pub(crate) line_index: usize,
    pub(crate) span: Span,
}

impl Segment {
    /// The three-character segment type code.
    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    /// All raw fields, position 0 (the type code) first. Fields beyond the
    /// schema are kept here even though they have no named attribute.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Raw field at a position (`0` is the type code; `n` is e.g. `PID-n`).
    pub fn field(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(String::as_str)
    }

    /// Named attributes.
    pub fn parsed(&self) -> &SegmentFields {
        &self.parsed
    }

    /// Shorthand for `self.parsed().get(name)`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parsed.get(name)
    }

    /// 0-based index of the source line.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Byte span of the source line.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A parsed HL7 message.
///
/// Created in one piece by the parser and never modified afterwards. The
/// first segment is always the MSH header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMessage {
    delimiters: Delimiters,
    segment_types: Vec<String>,
    segments: Vec<Segment>,
}

impl ParsedMessage {
    pub(crate) fn new(delimiters: Delimiters, segments: Vec<Segment>) -> Self {
        let segment_types = segments.iter().map(|s| s.segment_type.clone()).collect();
        Self {
            delimiters,
            segment_types,
            segments,
        }
    }

    /// Delimiters declared by the header.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Segments in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Type code of every segment, in source order, duplicates kept.
    pub fn segment_types(&self) -> &[String] {
        &self.segment_types
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false` for a successfully parsed message.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The MSH header segment.
    pub fn header(&self) -> &Segment {
        &self.segments[0]
    }

    /// MSH-9, e.g. `ADT^A03`.
    pub fn message_type(&self) -> Option<&str> {
        self.header_field(9)
    }

    /// MSH-10, the message control ID.
    pub fn control_id(&self) -> Option<&str> {
        self.header_field(10)
    }

    /// MSH-12, the HL7 version, e.g. `2.5`.
    pub fn version(&self) -> Option<&str> {
        self.header_field(12)
    }

    fn header_field(&self, position: usize) -> Option<&str> {
        self.header().field(position).filter(|v| !v.is_empty())
    }
}
