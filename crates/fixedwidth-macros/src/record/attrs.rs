//! Attribute parsing for the FixedWidth derive macro.
//!
//! This module provides parsers for the `#[fixed(...)]` field attributes
//! used by the `FixedWidth` derive macro. Each attribute describes one width
//! descriptor; a field may carry more than one.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, Result, Token,
};

/// Which side of a value receives padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    /// `pad = "left"`: value is right-aligned.
    Left,
    /// `pad = "right"`: value is left-aligned.
    Right,
}

impl PadSide {
    fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "left" | "Left" => Ok(PadSide::Left),
            "right" | "Right" => Ok(PadSide::Right),
            other => Err(Error::new(
                span,
                format!("unknown padding side: '{}'. Expected \"left\" or \"right\"", other),
            )),
        }
    }
}

/// One `#[fixed(...)]` attribute.
#[derive(Debug, Clone)]
pub struct DescriptorAttr {
    /// Width in characters.
    pub width: Option<usize>,
    /// Padding side (default: right).
    pub pad: PadSide,
    /// Padding character (default: space).
    pub pad_char: char,
    /// Date format pattern and its span, if declared here.
    pub date_format: Option<(String, Span)>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for DescriptorAttr {
    fn default() -> Self {
        DescriptorAttr {
            width: None,
            pad: PadSide::Right,
            pad_char: ' ',
            date_format: None,
            span: Span::call_site(),
        }
    }
}

fn lit_of(value: &Expr) -> Option<&Lit> {
    match value {
        Expr::Lit(ExprLit { lit, .. }) => Some(lit),
        _ => None,
    }
}

impl Parse for DescriptorAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = DescriptorAttr {
            span: input.span(),
            ..Default::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            let nv = match &meta {
                Meta::NameValue(nv) => nv,
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown fixed attribute. Expected: width = N, pad = \"left\"|\"right\", pad_char = 'c', or date_format = \"...\"",
                    ));
                }
            };

            if nv.path.is_ident("width") {
                match lit_of(&nv.value) {
                    Some(Lit::Int(n)) => attr.width = Some(n.base10_parse::<usize>()?),
                    _ => {
                        return Err(Error::new(
                            nv.value.span(),
                            "width must be an integer literal",
                        ))
                    }
                }
            } else if nv.path.is_ident("pad") {
                match lit_of(&nv.value) {
                    Some(Lit::Str(s)) => attr.pad = PadSide::from_str(&s.value(), s.span())?,
                    _ => {
                        return Err(Error::new(
                            nv.value.span(),
                            "pad must be a string literal: \"left\" or \"right\"",
                        ))
                    }
                }
            } else if nv.path.is_ident("pad_char") {
                match lit_of(&nv.value) {
                    Some(Lit::Char(c)) => attr.pad_char = c.value(),
                    _ => {
                        return Err(Error::new(
                            nv.value.span(),
                            "pad_char must be a char literal",
                        ))
                    }
                }
            } else if nv.path.is_ident("date_format") {
                match lit_of(&nv.value) {
                    Some(Lit::Str(s)) => attr.date_format = Some((s.value(), s.span())),
                    _ => {
                        return Err(Error::new(
                            nv.value.span(),
                            "date_format must be a string literal",
                        ))
                    }
                }
            } else {
                return Err(Error::new(
                    nv.path.span(),
                    "unknown attribute. Expected: width, pad, pad_char or date_format",
                ));
            }
        }

        Ok(attr)
    }
}

/// All `#[fixed(...)]` attributes of one field.
#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    /// Descriptors in declaration order.
    pub descriptors: Vec<DescriptorAttr>,
    /// The field's date format, from whichever attribute declared it.
    pub date_format: Option<String>,
}

impl FieldAttrs {
    /// Whether the field takes part in the wire format.
    pub fn is_wire_field(&self) -> bool {
        !self.descriptors.is_empty()
    }

    fn push(&mut self, mut descriptor: DescriptorAttr) -> Result<()> {
        if let Some((format, span)) = descriptor.date_format.take() {
            if self.date_format.is_some() {
                return Err(Error::new(
                    span,
                    "date_format is declared more than once for this field",
                ));
            }
            if descriptor.width.is_none() {
                return Err(Error::new(
                    span,
                    "date_format needs a width in the same attribute",
                ));
            }
            self.date_format = Some(format);
        }

        if descriptor.width.is_none() {
            return Err(Error::new(descriptor.span, "missing width = N"));
        }

        self.descriptors.push(descriptor);
        Ok(())
    }
}

/// Extract `#[fixed(...)]` attributes from a field's attributes.
pub fn parse_fixed_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut field = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("fixed") {
            continue;
        }
        let descriptor = attr.parse_args::<DescriptorAttr>()?;
        field.push(descriptor)?;
    }

    Ok(field)
}
