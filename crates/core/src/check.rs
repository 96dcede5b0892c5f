//! Non-fatal checks over a parsed message.
//!
//! A message that parses is structurally valid; these checks only surface
//! things a reader may want to know about: segments without a schema,
//! fields beyond the schema, empty required header fields, and a header
//! whose delimiters collide.

use std::collections::{BTreeMap, HashSet};

use crate::grammar::ast::ParsedMessage;
use crate::grammar::diag::{Diagnostic, codes};
use crate::grammar::tables::SchemaSet;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// MSH positions the standard marks as required, with their names.
const REQUIRED_HEADER_FIELDS: &[(usize, &str)] = &[
    (9, "MessageType"),
    (10, "MessageControlID"),
    (11, "ProcessingID"),
    (12, "VersionID"),
];

/// Run all message checks, in source order.
///
/// Unregistered segment types are reported once, at their first occurrence.
pub fn check_message(message: &ParsedMessage, schemas: &SchemaSet) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    check_header(message, &mut issues);

    let mut reported = HashSet::new();
    for segment in message.segments() {
        let code = segment.segment_type();
        let span = Some(segment.span());
        let line = (segment.line_index() + 1).to_string();
        match schemas.get(code) {
            None => {
                if reported.insert(code) {
                    issues.push(
                        Diagnostic::info(
                            codes::UNREGISTERED_SEGMENT,
                            format!("no schema registered for {code}; only SegmentType is mapped"),
                            span,
                        )
                        .with_context(ctx!("segment" => code, "line" => line)),
                    );
                }
            }
            Some(schema) => {
                let actual = segment.fields().len() - 1;
                if actual > schema.fields.len() {
                    issues.push(
                        Diagnostic::info(
                            codes::EXTRA_FIELDS,
                            format!(
                                "{code} has {actual} fields but its schema names {}",
                                schema.fields.len()
                            ),
                            span,
                        )
                        .with_context(ctx!(
                            "segment" => code,
                            "line" => line,
                            "expected" => schema.fields.len().to_string(),
                            "actual" => actual.to_string(),
                        )),
                    );
                }
            }
        }
    }

    log::debug!("message checks produced {} issues", issues.len());
    issues
}

fn check_header(message: &ParsedMessage, issues: &mut Vec<Diagnostic>) {
    let header = message.header();
    if let Some(conflict) = message.delimiters().conflict() {
        let delimiters: String = message.delimiters().as_array().iter().collect();
        issues.push(
            Diagnostic::warn(
                codes::DELIMITER_CONFLICT,
                format!("MSH declares delimiters {delimiters:?}: {conflict}"),
                Some(header.span()),
            )
            .with_context(ctx!("segment" => "MSH", "delimiters" => delimiters)),
        );
    }
    for &(position, name) in REQUIRED_HEADER_FIELDS {
        if header.field(position).is_none_or(str::is_empty) {
            issues.push(
                Diagnostic::warn(
                    codes::REQUIRED_HEADER_FIELD,
                    format!("MSH-{position} ({name}) is empty"),
                    Some(header.span()),
                )
                .with_context(ctx!("segment" => "MSH", "field" => format!("MSH-{position}"))),
            );
        }
    }
}
