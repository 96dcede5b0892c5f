//! Segment lookups over a parsed message.
//!
//! All functions are pure reads. Codes are matched exactly and
//! case-sensitively; absence is `None` or an empty `Vec`, never an error.

use crate::grammar::ast::{ParsedMessage, Segment};

/// Whether the message contains a segment of type `code`.
///
/// With `only_once`, true only if it contains exactly one.
pub fn has_segment(code: &str, message: &ParsedMessage, only_once: bool) -> bool {
    let mut matches = message.segment_types().iter().filter(|t| *t == code);
    if only_once {
        matches.next().is_some() && matches.next().is_none()
    } else {
        matches.next().is_some()
    }
}

/// First segment of type `code`, in source order.
pub fn get_segment_of_type<'m>(code: &str, message: &'m ParsedMessage) -> Option<&'m Segment> {
    message.segments().iter().find(|s| s.segment_type() == code)
}

/// Every segment of type `code`, in source order.
pub fn get_all_segments_of_type<'m>(code: &str, message: &'m ParsedMessage) -> Vec<&'m Segment> {
    message
        .segments()
        .iter()
        .filter(|s| s.segment_type() == code)
        .collect()
}
