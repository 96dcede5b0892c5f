/// Parsed message types: messages, segments, named attributes.
pub mod ast;
/// The delimiter set declared by the MSH header.
pub mod delimiters;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for parsed messages.
pub mod dump;
/// HL7 emitter: converts a parsed message back to wire text.
pub mod emit;
/// Fatal parse errors.
pub mod error;
/// HL7 tokenizer: splits raw text into segments and raw fields.
pub mod lexer;
/// Segment mapper: turns raw segments into named attributes.
pub mod parser;
/// Re-exports of schema types used by the parser and checks.
pub mod tables;
