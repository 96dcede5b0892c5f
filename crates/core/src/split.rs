//! Splitting a raw field value into repetitions and components.
//!
//! Parsed segments keep field values as raw strings. [`split_data_field`]
//! breaks one value down on demand, two levels deep: repetitions, then
//! components. Sub-components are left intact; split a component again on
//! [`Delimiters::subcomponent`] when a third level is needed.

use serde::Serialize;

use crate::grammar::delimiters::Delimiters;

/// Standard HL7 component separator.
pub const DEFAULT_COMPONENT_SEPARATOR: char = '^';
/// Standard HL7 repetition separator.
pub const DEFAULT_REPETITION_SEPARATOR: char = '~';

/// A field value split into repetitions and components.
///
/// Serializes untagged: a string, an array of strings, or an array whose
/// items are strings or arrays of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DataField<'a> {
    /// No separators present; the value unchanged.
    Plain(&'a str),
    /// Component separators only.
    Components(Vec<&'a str>),
    /// Repetition separators present; one entry per repetition.
    Repeated(Vec<Repetition<'a>>),
}

/// One repetition of a repeated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Repetition<'a> {
    /// A repetition without components.
    Plain(&'a str),
    /// A repetition split into components.
    Components(Vec<&'a str>),
}

impl<'a> DataField<'a> {
    /// The value itself, if it had no separators.
    pub fn as_plain(&self) -> Option<&'a str> {
        match self {
            DataField::Plain(s) => Some(*s),
            _ => None,
        }
    }

    /// Number of top-level parts: 1 for plain values, otherwise the number of
    /// components or repetitions. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            DataField::Plain(_) => 1,
            DataField::Components(parts) => parts.len(),
            DataField::Repeated(reps) => reps.len(),
        }
    }
}

impl<'a> Repetition<'a> {
    /// Components of this repetition; a plain repetition is one component.
    pub fn components(&self) -> Vec<&'a str> {
        match self {
            Repetition::Plain(s) => vec![*s],
            Repetition::Components(parts) => parts.clone(),
        }
    }
}

/// Split a value using the standard `^` and `~` separators.
pub fn split_data_field(value: &str) -> DataField<'_> {
    split_data_field_with(
        value,
        DEFAULT_COMPONENT_SEPARATOR,
        DEFAULT_REPETITION_SEPARATOR,
    )
}

/// Split a value using the separators a message declared.
pub fn split_with_delimiters<'a>(value: &'a str, delimiters: &Delimiters) -> DataField<'a> {
    split_data_field_with(value, delimiters.component, delimiters.repetition)
}

/// Split a value on explicit component and repetition separators.
pub fn split_data_field_with(value: &str, component: char, repetition: char) -> DataField<'_> {
    if value.contains(repetition) {
        let reps = value
            .split(repetition)
            .map(|chunk| {
                if chunk.contains(component) {
                    Repetition::Components(chunk.split(component).collect())
                } else {
                    Repetition::Plain(chunk)
                }
            })
            .collect();
        DataField::Repeated(reps)
    } else if value.contains(component) {
        DataField::Components(value.split(component).collect())
    } else {
        DataField::Plain(value)
    }
}
