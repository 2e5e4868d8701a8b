//! Decode pipeline: lines to records.
//!
//! Each line is consumed strictly left to right in schema order. For every
//! wire field the pipeline strips the delimiter from what is left of the
//! line, slices the field's width off the front, coerces the segment and
//! assigns it.

use crate::buffer::RecordBuffer;
use crate::coerce::Coercer;
use crate::config::ShortLinePolicy;
use crate::descriptor::byte_offset;
use crate::error::{FixedWidthError, Result};
use crate::schema::RecordSchema;
use crate::serializer::FixedWidthSerializer;
use crate::traits::FixedWidthRecord;

impl FixedWidthSerializer {
    /// Decodes every line of `buffer` into a record.
    ///
    /// Reading starts from the beginning of the buffer and leaves the
    /// position at its end. The first failing line aborts the whole decode.
    pub fn decode<T: FixedWidthRecord>(&self, buffer: &mut RecordBuffer) -> Result<Vec<T>> {
        let schema = RecordSchema::of::<T>()?;
        buffer.rewind();

        let mut records = Vec::new();
        let mut line_no = 0;
        while let Some(line) = buffer.read_line() {
            line_no += 1;
            records.push(self.decode_record(&schema, &line, line_no)?);
        }

        tracing::debug!(
            record = schema.record(),
            count = records.len(),
            "decoded fixed-width records"
        );
        Ok(records)
    }

    /// Decodes text holding one record per line.
    pub fn decode_str<T: FixedWidthRecord>(&self, input: &str) -> Result<Vec<T>> {
        self.decode(&mut RecordBuffer::from(input))
    }

    /// Decodes a single line. Errors report it as line 1.
    pub fn decode_line<T: FixedWidthRecord>(&self, line: &str) -> Result<T> {
        let schema = RecordSchema::of::<T>()?;
        self.decode_record(&schema, line, 1)
    }

    pub(crate) fn decode_record<T: FixedWidthRecord>(
        &self,
        schema: &RecordSchema,
        line: &str,
        line_no: usize,
    ) -> Result<T> {
        let delimiter = self.delimiter();
        let delimiter_len = delimiter.map_or(0, |d| d.chars().count());
        let coercer = Coercer {
            line: line_no,
            trim_text: self.config.trim_text_fields,
            trim_scalar: self.config.trim_scalar_fields,
            default_format: self.default_date_format.as_ref(),
        };

        let mut record = T::default();
        let mut rest = line.to_string();

        for field in schema.fields() {
            // Every occurrence goes, including any inside field data.
            if let Some(delimiter) = delimiter {
                if rest.contains(delimiter) {
                    rest = rest.replace(delimiter, "");
                }
            }

            let width = field.widths.decode_width(delimiter_len);
            let remaining = rest.chars().count();
            if remaining < width {
                match self.config.short_line {
                    ShortLinePolicy::Skip => {
                        tracing::trace!(
                            line = line_no,
                            field = field.name,
                            width,
                            remaining,
                            "line too short for field, leaving default"
                        );
                        continue;
                    }
                    ShortLinePolicy::Fail => {
                        return Err(FixedWidthError::ShortLine {
                            line: line_no,
                            field: field.name,
                            width,
                            remaining,
                        })
                    }
                }
            }

            let split = byte_offset(&rest, width);
            let segment = field.widths.inner_segment(&rest[..split]);
            let value = coercer.coerce(field, segment)?;
            record
                .set_field_value(field.index, value)
                .map_err(|reason| coercer.coercion_error(field, segment, reason))?;

            rest.replace_range(..split, "");
        }

        tracing::trace!(line = line_no, record = schema.record(), "decoded line");
        Ok(record)
    }
}
