//! Implementation of the `#[derive(FixedWidth)]` macro.
//!
//! This macro generates an implementation of the `FixedWidthRecord` trait and
//! field index constants for the struct's wire fields.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_fixed_attrs, PadSide};

/// Main implementation of the FixedWidth derive macro.
pub fn fixed_width_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "FixedWidth can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "FixedWidth can only be derived for structs",
            ))
        }
    };

    let mut decls: Vec<TokenStream> = Vec::new();
    let mut getters: Vec<TokenStream> = Vec::new();
    let mut setters: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_fixed_attrs(&field.attrs)?;

        // Fields without #[fixed] stay off the wire
        if !attrs.is_wire_field() {
            continue;
        }

        let index = Literal::usize_unsuffixed(decls.len());
        let ty = &field.ty;
        let name = field_name.to_string();

        let descriptors = attrs.descriptors.iter().map(|d| {
            let width = Literal::usize_unsuffixed(d.width.unwrap_or_default());
            let pad_char = d.pad_char;
            let side = match d.pad {
                PadSide::Left => quote! { ::fixedwidth::PaddingSide::Left },
                PadSide::Right => quote! { ::fixedwidth::PaddingSide::Right },
            };
            quote! {
                .descriptor(::fixedwidth::FieldDescriptor::new(#width).padding(#side, #pad_char))
            }
        });

        let date_format = attrs.date_format.as_ref().map(|pattern| {
            quote! { .date_format(#pattern) }
        });

        decls.push(quote! {
            ::fixedwidth::FieldDecl::new(#name, <#ty as ::fixedwidth::FieldType>::KIND)
                .nullable(<#ty as ::fixedwidth::FieldType>::NULLABLE)
                #(#descriptors)*
                #date_format
        });

        getters.push(quote! {
            #index => ::fixedwidth::FieldType::to_field_value(&self.#field_name),
        });

        setters.push(quote! {
            #index => {
                self.#field_name = <#ty as ::fixedwidth::FieldType>::from_field_value(value)?;
            }
        });

        // Generate constant name (SCREAMING_SNAKE_CASE)
        let const_name = format_ident!("{}", to_screaming_snake_case(&name));
        field_constants.push(quote! {
            /// Wire position of this field.
            pub const #const_name: usize = #index;
        });
    }

    if decls.is_empty() {
        return Err(Error::new(
            input.span(),
            "FixedWidth needs at least one field with a #[fixed(width = N)] attribute",
        ));
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::fixedwidth::FixedWidthRecord for #struct_name #ty_generics #where_clause {
            fn field_decls() -> ::std::vec::Vec<::fixedwidth::FieldDecl> {
                ::std::vec![#(#decls),*]
            }

            fn field_value(&self, index: usize) -> ::fixedwidth::FieldValue {
                match index {
                    #(#getters)*
                    _ => ::fixedwidth::FieldValue::Null,
                }
            }

            fn set_field_value(
                &mut self,
                index: usize,
                value: ::fixedwidth::FieldValue,
            ) -> ::std::result::Result<(), ::std::string::String> {
                match index {
                    #(#setters)*
                    _ => {}
                }
                ::std::result::Result::Ok(())
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
