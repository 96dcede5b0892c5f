use super::ast::ParsedMessage;

/// Serialize a parsed message to a pretty-printed JSON string.
pub fn to_pretty_json(message: &ParsedMessage) -> String {
    serde_json::to_string_pretty(message).expect("ParsedMessage serialization cannot fail")
}
