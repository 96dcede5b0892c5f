//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. IDs in the `HL71xxx` range are fatal parse errors;
//! `HL72xxx` are non-fatal message checks.

/// The first segment is absent, is not MSH, or is too short to declare delimiters.
pub const PARSER_MISSING_HEADER: &str = "HL71001";

/// A line does not start with a well-formed three-character segment code.
pub const PARSER_MALFORMED_SEGMENT: &str = "HL71002";

/// Segment type has no registered schema (legal, e.g. Z-segments).
pub const UNREGISTERED_SEGMENT: &str = "HL72001";

/// Segment carries more fields than its schema names.
pub const EXTRA_FIELDS: &str = "HL72002";

/// A header field that receivers rely on is empty or absent.
pub const REQUIRED_HEADER_FIELD: &str = "HL72003";

/// The header declares a delimiter twice, or uses a letter, digit or space.
pub const DELIMITER_CONFLICT: &str = "HL72004";

/// Every diagnostic code known to this crate, in ID order.
pub const ALL: &[&str] = &[
    PARSER_MISSING_HEADER,
    PARSER_MALFORMED_SEGMENT,
    UNREGISTERED_SEGMENT,
    EXTRA_FIELDS,
    REQUIRED_HEADER_FIELD,
    DELIMITER_CONFLICT,
];

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        PARSER_MISSING_HEADER => {
            "Every HL7 v2 message must start with an MSH segment. Its fourth character is the \
             field separator and the next four characters are the component, repetition, escape \
             and sub-component separators. The message is rejected when the first segment is not \
             MSH or is shorter than those eight characters."
        }
        PARSER_MALFORMED_SEGMENT => {
            "Each segment line must begin with a three-character type code: an uppercase letter \
             followed by two uppercase letters or digits, terminated by the field separator. \
             A single malformed line rejects the whole message."
        }
        UNREGISTERED_SEGMENT => {
            "The segment type is well formed but no schema is registered for it, so only its \
             SegmentType attribute is available. Register a schema to get named fields."
        }
        EXTRA_FIELDS => {
            "The segment has more fields than its schema names. The extra values are kept in the \
             raw field list but have no named attribute."
        }
        REQUIRED_HEADER_FIELD => {
            "MSH-9 (message type), MSH-10 (control ID), MSH-11 (processing ID) and MSH-12 \
             (version ID) are required by the HL7 v2 standard and should not be empty."
        }
        DELIMITER_CONFLICT => {
            "The header declares the same character for two roles, or uses a letter, digit or \
             space as a delimiter. The message still parses with the characters as declared, \
             but field values containing that character will split ambiguously. Headers with \
             only three encoding characters (MSH|^~\\|) trigger this."
        }
        _ => return None,
    };
    Some(text)
}
