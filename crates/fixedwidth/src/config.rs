//! Serializer configuration.
//!
//! [`SerializerConfig`] is a plain value: it is built once, handed to a
//! [`FixedWidthSerializer`](crate::FixedWidthSerializer) by value and never
//! mutated afterwards. It can be built in code or loaded from YAML/JSON.
//!
//! ```
//! use fixedwidth::{ShortLinePolicy, SerializerConfig};
//!
//! let config = SerializerConfig::from_yaml_str(
//!     "delimiter: \",\"\ndefault_date_format: yyyyMMdd\nshort_line: fail\n",
//! )
//! .unwrap();
//!
//! assert_eq!(config.delimiter(), Some(","));
//! assert_eq!(config.short_line, ShortLinePolicy::Fail);
//! assert!(config.trim_text_fields);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What decode does when a line is too short for the next field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortLinePolicy {
    /// Leave the field at its default and move on to the next field without
    /// consuming any input. Later fields on the same line may then read
    /// from the wrong columns.
    #[default]
    Skip,
    /// Fail the record with [`FixedWidthError::ShortLine`](crate::FixedWidthError::ShortLine).
    Fail,
}

/// How selective reads react to a line that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Record the failure and keep scanning.
    #[default]
    BestEffort,
    /// Record the failure and stop scanning.
    FailFast,
}

/// Line terminator written after each encoded record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options shared by every operation of a serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerConfig {
    /// Trim surrounding whitespace from text fields on decode.
    pub trim_text_fields: bool,
    /// Trim integer, real, boolean and unformatted date segments before
    /// coercion. Off by default, in which case padding left in such a
    /// segment makes coercion fail.
    pub trim_scalar_fields: bool,
    /// Format for date fields that declare none.
    pub default_date_format: Option<String>,
    /// Separator appended after each field's inner value.
    pub delimiter: Option<String>,
    /// Terminator written after each line.
    pub line_ending: LineEnding,
    /// Behaviour for lines too short for a field.
    pub short_line: ShortLinePolicy,
    /// Behaviour of selective reads on failing lines.
    pub scan_policy: ScanPolicy,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig {
            trim_text_fields: true,
            trim_scalar_fields: false,
            default_date_format: None,
            delimiter: None,
            line_ending: LineEnding::Lf,
            short_line: ShortLinePolicy::Skip,
            scan_policy: ScanPolicy::BestEffort,
        }
    }
}

impl SerializerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        SerializerConfig::default()
    }

    /// Loads a configuration from YAML (or JSON, which YAML accepts).
    ///
    /// Missing keys take their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// The active delimiter. An empty delimiter counts as none.
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref().filter(|d| !d.is_empty())
    }

    /// Sets text trimming.
    pub fn trim_text_fields(mut self, trim: bool) -> Self {
        self.trim_text_fields = trim;
        self
    }

    /// Sets trimming of non-text segments.
    pub fn trim_scalar_fields(mut self, trim: bool) -> Self {
        self.trim_scalar_fields = trim;
        self
    }

    /// Sets the default date format.
    pub fn default_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.default_date_format = Some(pattern.into());
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Sets the line terminator.
    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = ending;
        self
    }

    /// Sets the short-line policy.
    pub fn short_line(mut self, policy: ShortLinePolicy) -> Self {
        self.short_line = policy;
        self
    }

    /// Sets the scan policy.
    pub fn scan_policy(mut self, policy: ScanPolicy) -> Self {
        self.scan_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SerializerConfig::default();
        assert!(c.trim_text_fields);
        assert!(!c.trim_scalar_fields);
        assert_eq!(c.default_date_format, None);
        assert_eq!(c.delimiter(), None);
        assert_eq!(c.line_ending, LineEnding::Lf);
        assert_eq!(c.short_line, ShortLinePolicy::Skip);
        assert_eq!(c.scan_policy, ScanPolicy::BestEffort);
    }

    #[test]
    fn empty_delimiter_is_none() {
        let c = SerializerConfig::new().with_delimiter("");
        assert_eq!(c.delimiter(), None);
    }

    #[test]
    fn builder_chain() {
        let c = SerializerConfig::new()
            .trim_text_fields(false)
            .trim_scalar_fields(true)
            .default_date_format("yyyy-MM-dd")
            .with_delimiter("|")
            .line_ending(LineEnding::CrLf)
            .short_line(ShortLinePolicy::Fail)
            .scan_policy(ScanPolicy::FailFast);

        assert!(!c.trim_text_fields);
        assert!(c.trim_scalar_fields);
        assert_eq!(c.default_date_format.as_deref(), Some("yyyy-MM-dd"));
        assert_eq!(c.delimiter(), Some("|"));
        assert_eq!(c.line_ending.as_str(), "\r\n");
        assert_eq!(c.short_line, ShortLinePolicy::Fail);
        assert_eq!(c.scan_policy, ScanPolicy::FailFast);
    }

    #[test]
    fn loads_json() {
        let c = SerializerConfig::from_yaml_str(
            r#"{"trim_text_fields": false, "line_ending": "crlf", "scan_policy": "fail_fast"}"#,
        )
        .unwrap();
        assert!(!c.trim_text_fields);
        assert_eq!(c.line_ending, LineEnding::CrLf);
        assert_eq!(c.scan_policy, ScanPolicy::FailFast);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SerializerConfig::from_yaml_str("delimeter: \",\"\n").unwrap_err();
        assert!(err.to_string().starts_with("invalid serializer configuration"));
    }
}
