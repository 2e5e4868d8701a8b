//! Implementation of the `#[derive(FixedWidth)]` macro.
//!
//! This module turns `#[fixed(...)]` field annotations into a
//! `FixedWidthRecord` implementation and field index constants.

mod attrs;
mod derive;

pub use derive::fixed_width_derive_impl;
