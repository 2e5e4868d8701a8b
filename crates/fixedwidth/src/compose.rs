//! Composing heterogeneous records into one output buffer.

use crate::buffer::RecordBuffer;
use crate::error::Result;
use crate::serializer::FixedWidthSerializer;
use crate::traits::FixedWidthRecord;

/// Accumulates records of different types into one buffer, in the order
/// they are added.
///
/// Each record type is encoded independently with its own layout; lines
/// are simply concatenated.
///
/// ```ignore
/// let buffer = serializer
///     .compose()
///     .record(&star)?
///     .records(&planets)?
///     .record(&galaxy)?
///     .finish();
/// ```
#[derive(Debug)]
pub struct Composer<'s> {
    serializer: &'s FixedWidthSerializer,
    buffer: RecordBuffer,
    lines: usize,
}

impl<'s> Composer<'s> {
    /// Adds one record.
    pub fn record<T: FixedWidthRecord>(self, record: &T) -> Result<Self> {
        self.records(std::slice::from_ref(record))
    }

    /// Adds a sequence of records of one type.
    pub fn records<T: FixedWidthRecord>(mut self, records: &[T]) -> Result<Self> {
        self.serializer.encode_into(records, &mut self.buffer)?;
        self.lines += records.len();
        Ok(self)
    }

    /// Number of lines composed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Returns the composed buffer, positioned at the start.
    pub fn finish(self) -> RecordBuffer {
        let mut buffer = self.buffer;
        buffer.rewind();
        buffer
    }
}

impl FixedWidthSerializer {
    /// Starts composing a multi-type output buffer.
    pub fn compose(&self) -> Composer<'_> {
        Composer {
            serializer: self,
            buffer: RecordBuffer::new(),
            lines: 0,
        }
    }
}
