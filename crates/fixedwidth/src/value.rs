//! Runtime value types for field formatting and coercion.
//!
//! [`FieldValue`] is the owned, type-erased form a record field takes
//! between its Rust type and its wire text. [`FieldType`] connects the two
//! and is implemented for the supported field types: `String`, the
//! primitive integers, `f64`, `bool`, chrono's `NaiveDate` and
//! `NaiveDateTime`, and `Option<T>` of any of those.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Rendering used for dates that have no format.
pub(crate) const DEFAULT_DATE_RENDER: &str = "%Y-%m-%d %H:%M:%S";

/// The value type a field is formatted and coerced as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Signed or unsigned integer.
    Integer,
    /// Floating point.
    Real,
    /// Boolean.
    Bool,
    /// Date or date and time.
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::Bool => "boolean",
            ValueKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// An owned field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value. Renders as an empty string.
    Null,
    /// Text value.
    Text(String),
    /// Integer value, wide enough for every primitive up to 64 bits.
    Integer(i128),
    /// Floating point value.
    Real(f64),
    /// Boolean value.
    Bool(bool),
    /// Date and time value.
    Date(NaiveDateTime),
}

impl FieldValue {
    /// The kind of a non-null value.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(_) => Some(ValueKind::Text),
            FieldValue::Integer(_) => Some(ValueKind::Integer),
            FieldValue::Real(_) => Some(ValueKind::Real),
            FieldValue::Bool(_) => Some(ValueKind::Bool),
            FieldValue::Date(_) => Some(ValueKind::Date),
        }
    }

    fn mismatch(&self, expected: ValueKind) -> String {
        match self.kind() {
            Some(actual) => format!("expected {} value, got {}", expected, actual),
            None => format!("expected {} value, got null", expected),
        }
    }
}

/// The default textual representation of a value.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Real(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format(DEFAULT_DATE_RENDER)),
        }
    }
}

/// Conversion between a Rust field type and [`FieldValue`].
///
/// The derive macro calls these for every wire field, so any type
/// implementing this trait can appear in a `#[derive(FixedWidth)]` struct.
///
/// # Example
///
/// ```
/// use fixedwidth::{FieldType, FieldValue, ValueKind};
///
/// #[derive(Default)]
/// struct Code(String);
///
/// impl FieldType for Code {
///     const KIND: ValueKind = ValueKind::Text;
///
///     fn to_field_value(&self) -> FieldValue {
///         FieldValue::Text(self.0.clone())
///     }
///
///     fn from_field_value(value: FieldValue) -> Result<Self, String> {
///         String::from_field_value(value).map(Code)
///     }
/// }
/// ```
pub trait FieldType: Sized {
    /// The kind used to pick formatting and coercion rules.
    const KIND: ValueKind;

    /// Whether the type can hold [`FieldValue::Null`].
    const NULLABLE: bool = false;

    /// Converts the field to a value for encoding.
    fn to_field_value(&self) -> FieldValue;

    /// Builds the field from a decoded value of kind [`Self::KIND`].
    fn from_field_value(value: FieldValue) -> Result<Self, String>;
}

impl FieldType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::Text)),
        }
    }
}

macro_rules! integer_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: ValueKind = ValueKind::Integer;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(*self as i128)
                }

                fn from_field_value(value: FieldValue) -> Result<Self, String> {
                    match value {
                        FieldValue::Integer(n) => <$ty>::try_from(n).map_err(|_| {
                            format!("{} is out of range for {}", n, stringify!($ty))
                        }),
                        other => Err(other.mismatch(ValueKind::Integer)),
                    }
                }
            }
        )*
    };
}

integer_field_type!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldType for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Real(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Real(n) => Ok(n),
            other => Err(other.mismatch(ValueKind::Real)),
        }
    }
}

impl FieldType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }
}

impl FieldType for NaiveDateTime {
    const KIND: ValueKind = ValueKind::Date;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Date(d) => Ok(d),
            other => Err(other.mismatch(ValueKind::Date)),
        }
    }
}

impl FieldType for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(self.and_time(NaiveTime::MIN))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Date(d) => Ok(d.date()),
            other => Err(other.mismatch(ValueKind::Date)),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}
