//! Proc macros for Fixedwidth.
//!
//! This crate provides the [`FixedWidth`] derive, which declares how a
//! struct maps to a fixed-width line. It is re-exported by the `fixedwidth`
//! crate; depend on that rather than on this crate directly.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `FixedWidthRecord` trait for a struct with named fields.
///
/// Every field annotated with `#[fixed(...)]` occupies a slot on the line,
/// in declaration order. Fields without the attribute are left at their
/// `Default` value when decoding and are never written.
///
/// # Field Attributes
///
/// | Attribute | Type | Description |
/// |-----------|------|-------------|
/// | `width` | integer | Width in characters (required) |
/// | `pad` | string | `"left"` or `"right"` (default: `"right"`) |
/// | `pad_char` | char | Padding character (default: `' '`) |
/// | `date_format` | string | Date pattern such as `"yyyyMMdd"`, at most once per field |
///
/// Repeating `#[fixed(...)]` on a field declares a composite field: the
/// narrower descriptor formats the value and the wider one contains it.
/// More than two descriptors compile, but the record type fails with a
/// configuration error the first time it is used.
///
/// # Generated Code
///
/// 1. One `pub const FIELD_NAME: usize` per wire field holding its position
/// 2. An implementation of `FixedWidthRecord`
///
/// The field types must implement `fixedwidth::FieldType`, and the struct
/// must implement `Default`.
///
/// # Example
///
/// ```ignore
/// use fixedwidth::FixedWidth;
///
/// #[derive(Default, FixedWidth)]
/// struct StellarSystem {
///     #[fixed(width = 20)]
///     record_type: String,
///
///     #[fixed(width = 8)]
///     #[fixed(width = 15, pad = "left", pad_char = '*')]
///     name: String,
///
///     #[fixed(width = 10, pad = "left", pad_char = '0')]
///     radius: f64,
/// }
///
/// assert_eq!(StellarSystem::NAME, 1);
/// ```
#[proc_macro_derive(FixedWidth, attributes(fixed))]
pub fn fixed_width_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::fixed_width_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
