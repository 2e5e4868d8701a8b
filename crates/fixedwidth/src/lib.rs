//! Fixedwidth - positional fixed-width text codec for typed records.
//!
//! Fixedwidth maps structs to and from lines of text where every field
//! occupies a declared number of columns. There are no field names on the
//! wire: the order in which fields are declared is the order in which they
//! appear on a line.
//!
//! - Per-field width, padding side and padding character
//! - Composite fields with an inner formatting width and an outer
//!   containment width
//! - Date fields with custom formats (`yyyyMMdd`, `dd/MM/yyyy HH:mm`, ...)
//! - Optional delimiter after every field
//! - Selective reads that probe each line before decoding it in full
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fixedwidth::{FixedWidth, FixedWidthSerializer};
//!
//! #[derive(Debug, Default, PartialEq, FixedWidth)]
//! struct ChemicalElement {
//!     #[fixed(width = 20)]
//!     name: String,
//!     #[fixed(width = 5)]
//!     symbol: String,
//!     #[fixed(width = 5, pad = "left", pad_char = '0')]
//!     atomic_number: u32,
//!     #[fixed(width = 20, date_format = "yyyyMMdd")]
//!     discovered: NaiveDate,
//! }
//!
//! let serializer = FixedWidthSerializer::new();
//! let hydrogen = ChemicalElement {
//!     name: "Hydrogen".into(),
//!     symbol: "H".into(),
//!     atomic_number: 1,
//!     discovered: NaiveDate::from_ymd_opt(1766, 5, 16).unwrap(),
//! };
//!
//! let line = serializer.encode_line(&hydrogen).unwrap();
//! assert_eq!(line, "Hydrogen            H    0000117660516            ");
//!
//! let mut buffer = serializer.encode(&[hydrogen]).unwrap();
//! let decoded: Vec<ChemicalElement> = serializer.decode(&mut buffer).unwrap();
//! assert_eq!(decoded[0].discovered, NaiveDate::from_ymd_opt(1766, 5, 16).unwrap());
//! ```
//!
//! # Encoding
//!
//! For every field in declaration order:
//!
//! 1. Render the value. Dates with a format use it; everything else uses
//!    its default text, cut to the inner width.
//! 2. Pad to the inner width.
//! 3. Append the delimiter, if one is configured.
//! 4. For composite fields, pad to the outer width. Values already wider
//!    than the outer width are written unchanged.
//!
//! # Decoding
//!
//! For every field in declaration order the delimiter is removed from the
//! rest of the line, the field's width is sliced off the front and the
//! segment is coerced to the field's type. A line too short for a field
//! leaves that field at its default (see [`ShortLinePolicy`]).
//!
//! Text is trimmed by default; numbers, booleans and unformatted dates are
//! not, unless [`SerializerConfig::trim_scalar_fields`] is set. Pad numeric
//! fields with `'0'` on the left, or enable scalar trimming, to read back
//! what was written.
//!
//! # Selective Reads
//!
//! [`FixedWidthSerializer::read_single`] and
//! [`FixedWidthSerializer::read_many`] decode each line as a light probe
//! type first and only decode the full record when a predicate accepts
//! the probe. They report per-line outcomes in a [`ScanReport`].

mod buffer;
mod coerce;
mod compose;
mod config;
mod date_format;
mod decode;
mod descriptor;
mod encode;
mod error;
mod format;
mod scan;
mod schema;
mod serializer;
mod traits;
mod value;

// Re-export public API
pub use buffer::RecordBuffer;
pub use compose::Composer;
pub use config::{LineEnding, ScanPolicy, SerializerConfig, ShortLinePolicy};
pub use date_format::DateFormat;
pub use descriptor::{FieldDescriptor, PaddingSide, ResolveError, ResolvedWidths};
pub use error::{FixedWidthError, Result};
pub use scan::{LineOutcome, LineStatus, ScanReport};
pub use schema::{RecordSchema, SchemaField};
pub use serializer::FixedWidthSerializer;
pub use traits::{FieldDecl, FixedWidthRecord};
pub use value::{FieldType, FieldValue, ValueKind};

#[cfg(feature = "macros")]
pub use fixedwidth_macros::FixedWidth;
