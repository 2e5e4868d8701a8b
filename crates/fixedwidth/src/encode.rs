//! Encode pipeline: records to lines.

use crate::buffer::RecordBuffer;
use crate::error::Result;
use crate::format::render_field;
use crate::schema::RecordSchema;
use crate::serializer::FixedWidthSerializer;
use crate::traits::FixedWidthRecord;

impl FixedWidthSerializer {
    /// Encodes records into a new buffer, one terminated line per record.
    ///
    /// The record type's schema is resolved before anything is written, so a
    /// layout error produces no output at all.
    pub fn encode<T: FixedWidthRecord>(&self, records: &[T]) -> Result<RecordBuffer> {
        let mut buffer = RecordBuffer::new();
        self.encode_into(records, &mut buffer)?;
        Ok(buffer)
    }

    /// Appends encoded records to an existing buffer.
    pub fn encode_into<T: FixedWidthRecord>(
        &self,
        records: &[T],
        buffer: &mut RecordBuffer,
    ) -> Result<()> {
        let schema = RecordSchema::of::<T>()?;
        let terminator = self.config.line_ending.as_str();

        for record in records {
            buffer.push_line(&self.render_record(&schema, record), terminator);
        }

        tracing::debug!(
            record = schema.record(),
            count = records.len(),
            bytes = buffer.len(),
            "encoded fixed-width records"
        );
        Ok(())
    }

    /// Encodes a single record as a line without terminator.
    pub fn encode_line<T: FixedWidthRecord>(&self, record: &T) -> Result<String> {
        let schema = RecordSchema::of::<T>()?;
        Ok(self.render_record(&schema, record))
    }

    fn render_record<T: FixedWidthRecord>(&self, schema: &RecordSchema, record: &T) -> String {
        let delimiter = self.delimiter();
        let default_format = self.default_date_format.as_ref();

        schema
            .fields()
            .iter()
            .map(|field| {
                render_field(
                    field,
                    &record.field_value(field.index),
                    delimiter,
                    default_format,
                )
            })
            .collect()
    }
}
