//! Encode-side value formatting.
//!
//! Turns one field value into its wire text: render, truncate, inner pad,
//! delimiter, outer pad.

use crate::date_format::DateFormat;
use crate::schema::SchemaField;
use crate::value::FieldValue;

/// Renders a field to its complete wire text.
pub(crate) fn render_field(
    field: &SchemaField,
    value: &FieldValue,
    delimiter: Option<&str>,
    default_format: Option<&DateFormat>,
) -> String {
    let text = render_value(field, value, default_format);

    let mut padded = field.inner().pad(&text);
    if let Some(delimiter) = delimiter {
        padded.push_str(delimiter);
    }

    // The outer level only pads. A delimiter-suffixed value wider than the
    // outer width is written as is.
    match field.outer() {
        Some(outer) => outer.pad(&padded),
        None => padded,
    }
}

/// Renders a value before padding.
///
/// Formatted dates are written whole; everything else is cut to the inner
/// width.
fn render_value(
    field: &SchemaField,
    value: &FieldValue,
    default_format: Option<&DateFormat>,
) -> String {
    match value {
        FieldValue::Null => String::new(),
        FieldValue::Date(date) => match field.date_format.as_ref().or(default_format) {
            Some(format) => format.render(date),
            None => truncate(value.to_string(), field.inner().width),
        },
        other => truncate(other.to_string(), field.inner().width),
    }
}

/// Cuts `text` to at most `width` characters.
pub(crate) fn truncate(mut text: String, width: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(width) {
        text.truncate(idx);
    }
    text
}
