//! Decode-side coercion of sliced segments into field values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::date_format::DateFormat;
use crate::error::{FixedWidthError, Result};
use crate::schema::SchemaField;
use crate::value::{FieldValue, ValueKind};

/// Per-operation inputs to coercion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coercer<'a> {
    pub line: usize,
    pub trim_text: bool,
    pub trim_scalar: bool,
    pub default_format: Option<&'a DateFormat>,
}

impl Coercer<'_> {
    /// Converts one segment into the field's value.
    pub fn coerce(&self, field: &SchemaField, segment: &str) -> Result<FieldValue> {
        if field.nullable && segment.trim().is_empty() {
            return Ok(FieldValue::Null);
        }

        let format = match field.kind {
            ValueKind::Date => field.date_format.as_ref().or(self.default_format),
            _ => None,
        };
        if let Some(format) = format {
            let trimmed = segment.trim();
            return format
                .parse(trimmed)
                .map(FieldValue::Date)
                .map_err(|source| FixedWidthError::Format {
                    line: self.line,
                    field: field.name,
                    segment: segment.to_string(),
                    pattern: format.pattern().to_string(),
                    source,
                });
        }

        let raw = if self.trim_scalar { segment.trim() } else { segment };
        let parsed = match field.kind {
            ValueKind::Text => {
                let text = if self.trim_text { segment.trim() } else { segment };
                Ok(FieldValue::Text(text.to_string()))
            }
            ValueKind::Integer => raw
                .parse::<i128>()
                .map(FieldValue::Integer)
                .map_err(|e| e.to_string()),
            ValueKind::Real => raw
                .parse::<f64>()
                .map(FieldValue::Real)
                .map_err(|e| e.to_string()),
            ValueKind::Bool => parse_bool(raw).map(FieldValue::Bool),
            ValueKind::Date => parse_unformatted_date(raw).map(FieldValue::Date),
        };

        parsed.map_err(|reason| self.coercion_error(field, segment, reason))
    }

    /// Builds a coercion error for `field`.
    pub fn coercion_error(
        &self,
        field: &SchemaField,
        segment: &str,
        reason: String,
    ) -> FixedWidthError {
        FixedWidthError::Coercion {
            line: self.line,
            field: field.name,
            segment: segment.to_string(),
            kind: field.kind,
            reason,
        }
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

fn parse_unformatted_date(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, ResolvedWidths};

    fn field(kind: ValueKind) -> SchemaField {
        SchemaField {
            index: 0,
            name: "f",
            kind,
            nullable: false,
            widths: ResolvedWidths::resolve(&[FieldDescriptor::new(10)])
                .unwrap()
                .unwrap(),
            date_format: None,
        }
    }

    fn coercer() -> Coercer<'static> {
        Coercer {
            line: 3,
            trim_text: true,
            trim_scalar: false,
            default_format: None,
        }
    }

    #[test]
    fn text_trimming_follows_config() {
        let f = field(ValueKind::Text);
        assert_eq!(
            coercer().coerce(&f, "  Venus   ").unwrap(),
            FieldValue::Text("Venus".into())
        );

        let raw = Coercer {
            trim_text: false,
            ..coercer()
        };
        assert_eq!(
            raw.coerce(&f, "  Venus   ").unwrap(),
            FieldValue::Text("  Venus   ".into())
        );
    }

    #[test]
    fn integers_are_not_trimmed_by_default() {
        let f = field(ValueKind::Integer);
        assert_eq!(coercer().coerce(&f, "00015").unwrap(), FieldValue::Integer(15));

        let err = coercer().coerce(&f, "15   ").unwrap_err();
        match err {
            FixedWidthError::Coercion {
                line, field, kind, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(field, "f");
                assert_eq!(kind, ValueKind::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn scalar_trimming_is_opt_in() {
        let c = Coercer {
            trim_scalar: true,
            ..coercer()
        };
        assert_eq!(c.coerce(&field(ValueKind::Integer), "15   ").unwrap(), FieldValue::Integer(15));
        assert_eq!(c.coerce(&field(ValueKind::Real), "  57.91").unwrap(), FieldValue::Real(57.91));
        assert_eq!(c.coerce(&field(ValueKind::Bool), "false ").unwrap(), FieldValue::Bool(false));
    }

    #[test]
    fn bool_is_case_insensitive() {
        let f = field(ValueKind::Bool);
        assert_eq!(coercer().coerce(&f, "True").unwrap(), FieldValue::Bool(true));
        assert_eq!(coercer().coerce(&f, "FALSE").unwrap(), FieldValue::Bool(false));
        assert!(coercer().coerce(&f, "yes").is_err());
    }

    #[test]
    fn formatted_date_is_trimmed_and_strict() {
        let mut f = field(ValueKind::Date);
        f.date_format = Some(DateFormat::compile("yyyyMMdd").unwrap());

        let expected = NaiveDate::from_ymd_opt(1766, 5, 16)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(coercer().coerce(&f, "17660516  ").unwrap(), FieldValue::Date(expected));

        let err = coercer().coerce(&f, "1766-05-16").unwrap_err();
        assert!(matches!(err, FixedWidthError::Format { line: 3, .. }));
        assert!(err.to_string().contains("yyyyMMdd"));
    }

    #[test]
    fn default_format_applies_to_date_fields() {
        let default = DateFormat::compile("dd.MM.yyyy").unwrap();
        let c = Coercer {
            default_format: Some(&default),
            ..coercer()
        };
        let expected = NaiveDate::from_ymd_opt(1669, 7, 17)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(
            c.coerce(&field(ValueKind::Date), "17.07.1669").unwrap(),
            FieldValue::Date(expected)
        );
    }

    #[test]
    fn unformatted_dates_accept_default_text() {
        let f = field(ValueKind::Date);
        let c = coercer();
        assert!(c.coerce(&f, "1766-05-16 08:30:00").is_ok());
        assert!(c.coerce(&f, "1766-05-16T08:30:00").is_ok());
        assert!(c.coerce(&f, "1766-05-16").is_ok());
        assert!(c.coerce(&f, "16/05/1766").is_err());
    }

    #[test]
    fn blank_nullable_segment_is_null() {
        let mut f = field(ValueKind::Integer);
        f.nullable = true;
        assert_eq!(coercer().coerce(&f, "     ").unwrap(), FieldValue::Null);
        assert_eq!(coercer().coerce(&f, "42").unwrap(), FieldValue::Integer(42));
    }
}
