use serde::{Deserialize, Serialize};

/// The five separator characters a message declares in its MSH header.
///
/// `MSH|^~\&|...` declares `|` as the field separator (offset 3) followed by
/// the four encoding characters at offsets 4..=7: component, repetition,
/// escape, and sub-component. The set is read once per message and applied
/// to every segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Field separator (MSH-1, default `|`).
    pub field: char,
    /// Component separator (default `^`).
    pub component: char,
    /// Repetition separator (default `~`).
    pub repetition: char,
    /// Escape character (default `\`).
    pub escape: char,
    /// Sub-component separator (default `&`).
    pub subcomponent: char,
}

/// A questionable character in a declared delimiter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DelimiterConflict {
    /// The character could also appear inside ordinary values.
    #[error("{0:?} is used as a delimiter")]
    Unusable(char),
    /// The character is declared for two different roles.
    #[error("delimiter {0:?} is declared more than once")]
    Repeated(char),
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Minimum header length in characters: `MSH`, the field separator, and
    /// four encoding characters.
    pub const HEADER_LEN: usize = 8;

    /// Read the delimiter set from the start of an MSH line.
    ///
    /// Only the fixed character offsets 3..=7 are inspected; the caller
    /// checks the `MSH` prefix. `None` when the line is too short. Whatever
    /// characters sit at those offsets are taken as declared, see
    /// [`Delimiters::conflict`] for the sanity check.
    pub fn from_header(line: &str) -> Option<Self> {
        let mut chars = line.chars().skip(3);
        Some(Self {
            field: chars.next()?,
            component: chars.next()?,
            repetition: chars.next()?,
            escape: chars.next()?,
            subcomponent: chars.next()?,
        })
    }

    /// First delimiter that is alphanumeric, whitespace, or declared twice.
    ///
    /// Such a header still parses, but values containing that character
    /// split ambiguously.
    pub fn conflict(&self) -> Option<DelimiterConflict> {
        let all = self.as_array();
        all.iter().enumerate().find_map(|(i, &c)| {
            if c.is_alphanumeric() || c.is_whitespace() {
                Some(DelimiterConflict::Unusable(c))
            } else if all[..i].contains(&c) {
                Some(DelimiterConflict::Repeated(c))
            } else {
                None
            }
        })
    }

    /// The delimiters in header order: field, component, repetition, escape,
    /// sub-component.
    pub fn as_array(&self) -> [char; 5] {
        [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ]
    }

    /// The MSH-2 encoding characters string (e.g. `^~\&`).
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }
}
