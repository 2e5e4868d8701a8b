//! Field descriptors and inner/outer width resolution.
//!
//! A field on the wire is described by one or two [`FieldDescriptor`]s.
//! With one descriptor the field is a plain fixed-width column. With two,
//! the narrower descriptor formats the value (the *inner* width) and the
//! wider one contains it (the *outer* width).

use serde::{Deserialize, Serialize};

/// Which side of a value receives padding characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingSide {
    /// Pad before the value, right-aligning it.
    Left,
    /// Pad after the value, left-aligning it.
    #[default]
    Right,
}

/// Width and padding for one level of a field.
///
/// # Example
///
/// ```
/// use fixedwidth::{FieldDescriptor, PaddingSide};
///
/// let d = FieldDescriptor::new(5).pad_left('0');
/// assert_eq!(d.width, 5);
/// assert_eq!(d.side, PaddingSide::Left);
/// assert_eq!(d.pad("42"), "00042");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Width in characters.
    pub width: usize,
    /// Side that receives padding.
    #[serde(default)]
    pub side: PaddingSide,
    /// Character used for padding.
    #[serde(default = "default_pad_char")]
    pub pad_char: char,
}

fn default_pad_char() -> char {
    ' '
}

impl FieldDescriptor {
    /// Creates a descriptor that right-pads with spaces.
    pub const fn new(width: usize) -> Self {
        FieldDescriptor {
            width,
            side: PaddingSide::Right,
            pad_char: ' ',
        }
    }

    /// Sets both the padding side and character.
    pub const fn padding(mut self, side: PaddingSide, pad_char: char) -> Self {
        self.side = side;
        self.pad_char = pad_char;
        self
    }

    /// Pads on the left with `pad_char`.
    pub const fn pad_left(self, pad_char: char) -> Self {
        self.padding(PaddingSide::Left, pad_char)
    }

    /// Pads on the right with `pad_char`.
    pub const fn pad_right(self, pad_char: char) -> Self {
        self.padding(PaddingSide::Right, pad_char)
    }

    /// Pads `value` up to this descriptor's width.
    ///
    /// Values already at or beyond the width are returned unchanged; this
    /// never truncates.
    pub fn pad(&self, value: &str) -> String {
        let len = value.chars().count();
        if len >= self.width {
            return value.to_string();
        }

        let fill: String = std::iter::repeat(self.pad_char)
            .take(self.width - len)
            .collect();
        match self.side {
            PaddingSide::Left => fill + value,
            PaddingSide::Right => {
                let mut out = String::with_capacity(value.len() + fill.len());
                out.push_str(value);
                out.push_str(&fill);
                out
            }
        }
    }
}

/// Why a descriptor set could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// More than two descriptors on one field.
    TooMany(usize),
    /// A descriptor declares width zero.
    ZeroWidth,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::TooMany(n) => {
                write!(f, "{} width descriptors declared, at most 2 are allowed", n)
            }
            ResolveError::ZeroWidth => write!(f, "width must be at least 1"),
        }
    }
}

/// The descriptor pair a field encodes and decodes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Formatting width.
    pub inner: FieldDescriptor,
    /// Containment width for composite fields.
    pub outer: Option<FieldDescriptor>,
}

impl ResolvedWidths {
    /// Resolves a field's raw descriptors.
    ///
    /// Returns `Ok(None)` when the field has no descriptors and therefore
    /// does not take part in the wire format.
    ///
    /// ```
    /// use fixedwidth::{FieldDescriptor, ResolvedWidths};
    ///
    /// let wide = FieldDescriptor::new(15).pad_left('*');
    /// let narrow = FieldDescriptor::new(10);
    /// let resolved = ResolvedWidths::resolve(&[wide, narrow]).unwrap().unwrap();
    /// assert_eq!(resolved.inner, narrow);
    /// assert_eq!(resolved.outer, Some(wide));
    /// ```
    pub fn resolve(descriptors: &[FieldDescriptor]) -> Result<Option<Self>, ResolveError> {
        if descriptors.iter().any(|d| d.width == 0) {
            return Err(ResolveError::ZeroWidth);
        }

        match descriptors {
            [] => Ok(None),
            [only] => Ok(Some(ResolvedWidths {
                inner: *only,
                outer: None,
            })),
            [a, b] => {
                let (inner, outer) = if a.width >= b.width { (b, a) } else { (a, b) };
                Ok(Some(ResolvedWidths {
                    inner: *inner,
                    outer: Some(*outer),
                }))
            }
            more => Err(ResolveError::TooMany(more.len())),
        }
    }

    /// Number of characters the field occupies once `delimiter_len`
    /// characters of delimiter have been stripped from the line.
    pub fn decode_width(&self, delimiter_len: usize) -> usize {
        match self.outer {
            Some(outer) => outer.width.saturating_sub(delimiter_len).max(self.inner.width),
            None => self.inner.width,
        }
    }

    /// Extracts the inner value window from a composite segment.
    ///
    /// The outer padding sits on the outer descriptor's side, so the inner
    /// value is the `inner.width` characters at the opposite end.
    pub fn inner_segment<'a>(&self, segment: &'a str) -> &'a str {
        let Some(outer) = self.outer else {
            return segment;
        };

        let len = segment.chars().count();
        if len <= self.inner.width {
            return segment;
        }

        match outer.side {
            PaddingSide::Left => {
                let skip = len - self.inner.width;
                &segment[byte_offset(segment, skip)..]
            }
            PaddingSide::Right => &segment[..byte_offset(segment, self.inner.width)],
        }
    }
}

/// Byte offset of the `chars`-th character, or the string length.
pub(crate) fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}
