//! Traits for derive macro support.
//!
//! This module provides the [`FixedWidthRecord`] trait which is implemented
//! by the `#[derive(FixedWidth)]` macro and describes a record type's wire
//! layout.

use crate::descriptor::FieldDescriptor;
use crate::value::{FieldValue, ValueKind};

/// A field as declared on a record type.
///
/// Declarations are raw: they are validated and resolved into a
/// [`RecordSchema`](crate::RecordSchema) the first time the record type is
/// used.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field name, used in error messages.
    pub name: &'static str,
    /// Value kind of the field's type.
    pub kind: ValueKind,
    /// Whether the field's type accepts null.
    pub nullable: bool,
    /// Width descriptors in declaration order.
    pub descriptors: Vec<FieldDescriptor>,
    /// Field-level date format pattern.
    pub date_format: Option<&'static str>,
}

impl FieldDecl {
    /// Creates a declaration with no descriptors.
    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        FieldDecl {
            name,
            kind,
            nullable: false,
            descriptors: Vec::new(),
            date_format: None,
        }
    }

    /// Adds a width descriptor.
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Sets the field-level date format.
    pub fn date_format(mut self, pattern: &'static str) -> Self {
        self.date_format = Some(pattern);
        self
    }

    /// Marks the field as nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Trait for types that map to fixed-width lines.
///
/// This trait is typically derived using `#[derive(FixedWidth)]`, but can
/// also be implemented manually. Field indices refer to positions in the
/// vector returned by [`field_decls`](Self::field_decls), which lists fields
/// in wire order.
///
/// # Manual Implementation
///
/// ```
/// use fixedwidth::{FieldDecl, FieldDescriptor, FieldType, FieldValue, FixedWidthRecord};
///
/// #[derive(Default)]
/// struct Element {
///     symbol: String,
///     atomic_number: u32,
/// }
///
/// impl FixedWidthRecord for Element {
///     fn field_decls() -> Vec<FieldDecl> {
///         vec![
///             FieldDecl::new("symbol", String::KIND).descriptor(FieldDescriptor::new(3)),
///             FieldDecl::new("atomic_number", u32::KIND)
///                 .descriptor(FieldDescriptor::new(3).pad_left('0')),
///         ]
///     }
///
///     fn field_value(&self, index: usize) -> FieldValue {
///         match index {
///             0 => self.symbol.to_field_value(),
///             1 => self.atomic_number.to_field_value(),
///             _ => FieldValue::Null,
///         }
///     }
///
///     fn set_field_value(&mut self, index: usize, value: FieldValue) -> Result<(), String> {
///         match index {
///             0 => self.symbol = FieldType::from_field_value(value)?,
///             1 => self.atomic_number = FieldType::from_field_value(value)?,
///             _ => {}
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait FixedWidthRecord: Default + 'static {
    /// Field declarations in wire order.
    fn field_decls() -> Vec<FieldDecl>;

    /// Returns the value of the field at `index` for encoding.
    fn field_value(&self, index: usize) -> FieldValue;

    /// Assigns a decoded value to the field at `index`.
    ///
    /// Returns a description of the problem when the value does not fit the
    /// field's type (for example an integer that overflows a `u8`).
    fn set_field_value(&mut self, index: usize, value: FieldValue) -> Result<(), String>;
}
