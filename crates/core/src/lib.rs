//! HL7 toolchain core library.
//!
//! Parses HL7 v2.x pipe-delimited messages into segments with named
//! attributes. The main entry points are [`parse_str`] for parsing, the
//! [`query`] functions for segment lookups, and [`split_data_field`] for
//! breaking a field value into repetitions and components.

#![warn(missing_docs)]

/// Non-fatal message checks.
pub mod check;
/// HL7 grammar: delimiters, tokenizer, mapper, parsed types, emitter.
pub mod grammar;
/// Segment lookups over a parsed message.
pub mod query;
/// Field value splitting into repetitions and components.
pub mod split;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::error::ParseError;
pub use grammar::lexer::SegmentTerminator;
pub use grammar::parser::{ParseOptions, parse_str, parse_with_options, parse_with_schemas};

// Parsed message
pub use grammar::ast::{ParsedMessage, Segment, SegmentFields};
pub use grammar::delimiters::{DelimiterConflict, Delimiters};

// Queries and splitting
pub use query::{get_all_segments_of_type, get_segment_of_type, has_segment};
pub use split::{DataField, Repetition, split_data_field, split_data_field_with};

// Emitter
pub use grammar::emit::{EmitConfig, emit_hl7};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Checks
pub use check::check_message;

// Schemas
pub use grammar::tables::{SchemaSet, SegmentSchema};

// Serialization helpers
pub use grammar::dump::to_pretty_json;
