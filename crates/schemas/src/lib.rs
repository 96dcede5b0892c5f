//! HL7 v2 segment schemas.
//!
//! A [`SegmentSchema`] maps a three-character segment type code to the
//! ordered names of its fields. A [`SchemaSet`] is the collection the parser
//! consults when turning positional fields into named attributes. The default
//! set carries MSH, EVN, PID and PV1; callers extend it with
//! [`SchemaSet::register`] or from JSON with [`SchemaSet::extend_from_json_str`].

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Attribute key under which every segment exposes its type code (position 0).
pub const SEGMENT_TYPE_KEY: &str = "SegmentType";

/// Current format version for schema JSON files.
pub const SCHEMA_FORMAT_VERSION: &str = "1.0.0";

/// Errors that can occur when registering or loading segment schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON deserialization failed.
    #[error("invalid schema JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The segment code is not an uppercase letter followed by two
    /// uppercase letters or digits.
    #[error("invalid segment code {code:?}: expected e.g. \"PID\" or \"ZP1\"")]
    InvalidCode {
        /// The rejected code.
        code: String,
    },

    /// A field name in the schema is unusable.
    #[error("invalid field name at {code}-{position}: {reason}")]
    InvalidField {
        /// The segment code the field belongs to.
        code: String,
        /// 1-based field position.
        position: usize,
        /// A human-readable explanation of why the name was rejected.
        reason: String,
    },
}

/// Returns `true` if `code` is a well-formed segment type code: an uppercase
/// ASCII letter followed by two uppercase ASCII letters or digits.
pub fn is_segment_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 3
        && b[0].is_ascii_uppercase()
        && b[1..]
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Field names for one segment type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentSchema {
    /// Three-character segment type code (e.g. `"PV1"`).
    pub code: String,
    /// Human-readable segment name (e.g. `"Patient Visit"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names for field positions 1..=n, in order.
    pub fields: Vec<String>,
}

impl SegmentSchema {
    /// Create a schema without a description.
    pub fn new<I, S>(code: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            description: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of the field at a 1-based position, if the schema declares one.
    pub fn field_name(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
    }

    /// 1-based position of a named field.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name).map(|i| i + 1)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if !is_segment_code(&self.code) {
            return Err(SchemaError::InvalidCode {
                code: self.code.clone(),
            });
        }
        for (i, name) in self.fields.iter().enumerate() {
            let reason = if name.trim().is_empty() {
                "name is empty"
            } else if name == SEGMENT_TYPE_KEY {
                "name is reserved for the segment type"
            } else if self.fields[..i].contains(name) {
                "name is declared twice"
            } else {
                continue;
            };
            return Err(SchemaError::InvalidField {
                code: self.code.clone(),
                position: i + 1,
                reason: reason.to_string(),
            });
        }
        Ok(())
    }
}

/// On-disk shape of a schema file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaFile {
    #[serde(default = "default_format_version")]
    format_version: String,
    schemas: Vec<SegmentSchema>,
}

fn default_format_version() -> String {
    SCHEMA_FORMAT_VERSION.to_string()
}

/// Parse a schema JSON document into its schemas, validating each one.
///
/// The expected shape is `{"schemas": [{"code": "ZEV", "fields": [...]}]}`.
pub fn load_schemas_from_str(json: &str) -> Result<Vec<SegmentSchema>, SchemaError> {
    let file: SchemaFile = serde_json::from_str(json)?;
    if file.format_version != SCHEMA_FORMAT_VERSION {
        log::warn!(
            "schema file format {} differs from supported {}",
            file.format_version,
            SCHEMA_FORMAT_VERSION
        );
    }
    for schema in &file.schemas {
        schema.validate()?;
    }
    Ok(file.schemas)
}

/// The set of segment schemas a parse consults.
///
/// Built once and then borrowed immutably by the parser. Registration needs
/// `&mut self`, so it can never race an in-flight parse.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaSet {
    /// Registered schemas in registration order.
    schemas: Vec<SegmentSchema>,

    /// Cached map from segment code → index into `schemas` (lazily initialized).
    #[serde(skip)]
    index: OnceLock<HashMap<String, usize>>,
}

impl Default for SchemaSet {
    /// The built-in MSH, EVN, PID and PV1 schemas.
    fn default() -> Self {
        let schemas = builtin::BUILTIN
            .iter()
            .map(|(code, description, fields)| {
                SegmentSchema::new(*code, fields.iter().copied()).with_description(*description)
            })
            .collect();
        Self {
            schemas,
            index: OnceLock::new(),
        }
    }
}

impl SchemaSet {
    /// A set with no schemas; every segment maps to the generic fallback.
    pub fn empty() -> Self {
        Self {
            schemas: Vec::new(),
            index: OnceLock::new(),
        }
    }

    /// Returns the cached code → index map, building it lazily on first access.
    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.schemas
                .iter()
                .enumerate()
                .map(|(i, s)| (s.code.clone(), i))
                .collect()
        })
    }

    /// Look up the schema for a segment code.
    pub fn get(&self, code: &str) -> Option<&SegmentSchema> {
        self.index().get(code).map(|&i| &self.schemas[i])
    }

    /// Whether a schema is registered for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.index().contains_key(code)
    }

    /// Registered schemas in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSchema> {
        self.schemas.iter()
    }

    /// Registered segment codes in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.code.as_str())
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Register field names for a segment code.
    ///
    /// Re-registering a code replaces its schema (last write wins) and
    /// returns the previous one.
    pub fn register<I, S>(
        &mut self,
        code: impl Into<String>,
        fields: I,
    ) -> Result<Option<SegmentSchema>, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_schema(SegmentSchema::new(code, fields))
    }

    /// Register a complete [`SegmentSchema`]. See [`SchemaSet::register`].
    pub fn register_schema(
        &mut self,
        schema: SegmentSchema,
    ) -> Result<Option<SegmentSchema>, SchemaError> {
        schema.validate()?;
        let previous = match self.index().get(&schema.code).copied() {
            Some(i) => {
                log::debug!("replacing schema for {}", schema.code);
                Some(std::mem::replace(&mut self.schemas[i], schema))
            }
            None => {
                log::debug!(
                    "registering schema for {} ({} fields)",
                    schema.code,
                    schema.fields.len()
                );
                self.schemas.push(schema);
                self.index.take();
                None
            }
        };
        Ok(previous)
    }

    /// Register every schema in a JSON document (see [`load_schemas_from_str`]).
    ///
    /// Nothing is registered if any schema in the document is invalid.
    /// Returns the number of schemas registered.
    pub fn extend_from_json_str(&mut self, json: &str) -> Result<usize, SchemaError> {
        let schemas = load_schemas_from_str(json)?;
        let n = schemas.len();
        for schema in schemas {
            self.register_schema(schema)?;
        }
        Ok(n)
    }
}
