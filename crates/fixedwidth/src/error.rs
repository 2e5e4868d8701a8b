//! Error types for the fixed-width codec.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while resolving schemas, encoding or decoding records.
#[derive(Debug, Error)]
pub enum FixedWidthError {
    /// A record type declares an unusable layout.
    ///
    /// This is a definition-time defect: it is raised the first time the
    /// record type is used and never depends on the data being processed.
    #[error("invalid fixed-width layout for {record}.{field}: {reason}")]
    Configuration {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A segment did not match the field's date format.
    #[error("line {line}: field '{field}' value {segment:?} does not match date format {pattern:?}: {source}")]
    Format {
        line: usize,
        field: &'static str,
        segment: String,
        pattern: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A segment could not be converted to the field's value type.
    #[error("line {line}: field '{field}' cannot read {segment:?} as {kind}: {reason}")]
    Coercion {
        line: usize,
        field: &'static str,
        segment: String,
        kind: ValueKind,
        reason: String,
    },

    /// The remaining line was too short for a field and the serializer is
    /// configured to reject short lines.
    #[error("line {line}: field '{field}' needs {width} characters but only {remaining} remain")]
    ShortLine {
        line: usize,
        field: &'static str,
        width: usize,
        remaining: usize,
    },

    /// Serializer configuration could not be loaded.
    #[error("invalid serializer configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl FixedWidthError {
    /// Returns `true` for definition-time layout errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, FixedWidthError::Configuration { .. })
    }

    /// Returns the 1-based input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            FixedWidthError::Format { line, .. }
            | FixedWidthError::Coercion { line, .. }
            | FixedWidthError::ShortLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for fixed-width operations.
pub type Result<T> = std::result::Result<T, FixedWidthError>;
